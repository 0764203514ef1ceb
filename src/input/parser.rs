// src/input/parser.rs

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::errors::{ContendError, Result};
use crate::input::Workload;
use crate::task::TaskSpec;
use crate::types::Requirements;

const RESOURCES_DIRECTIVE: &str = "resources";
const TASK_DIRECTIVE: &str = "task";
const COMMENT_PREFIX: char = '#';

/// Read and parse an input file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Workload> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ContendError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(?path, "input file opened");
    parse_str(&contents)
}

/// Parse input file contents.
///
/// Stops at the first malformed line; nothing after it is looked at.
pub fn parse_str(contents: &str) -> Result<Workload> {
    let mut workload = Workload::default();

    for (idx, raw) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            debug!(line = line_no, "ignoring blank/comment line");
            continue;
        }

        parse_line(line, &mut workload).map_err(|message| ContendError::Parse {
            line: line_no,
            message,
            text: raw.to_string(),
        })?;
    }

    info!(
        resources = workload.resources.len(),
        tasks = workload.tasks.len(),
        "input parsed"
    );
    Ok(workload)
}

fn parse_line(line: &str, workload: &mut Workload) -> std::result::Result<(), String> {
    let mut tokens = line.split_whitespace();
    let directive = tokens.next().unwrap_or_default();

    match directive {
        RESOURCES_DIRECTIVE => {
            for token in tokens {
                let (name, count) = parse_pair(token)?;
                debug!(resource = %name, count, "parsed resource");
                workload.resources.insert(name, count);
            }
            Ok(())
        }
        TASK_DIRECTIVE => {
            let spec = parse_task(tokens)?;
            debug!(task = %spec.name, "parsed task");
            workload.tasks.push(spec);
            Ok(())
        }
        other => Err(format!("unrecognized directive '{other}'")),
    }
}

fn parse_task<'a>(mut tokens: impl Iterator<Item = &'a str>) -> std::result::Result<TaskSpec, String> {
    let name = tokens
        .next()
        .ok_or_else(|| "task line is missing the task name".to_string())?;
    let busy = parse_millis(tokens.next(), "busy time")?;
    let idle = parse_millis(tokens.next(), "idle time")?;

    let mut requirements = Requirements::new();
    for token in tokens {
        let (resource, amount) = parse_pair(token)?;
        requirements.add(resource, amount);
    }

    Ok(TaskSpec::new(name, busy, idle, requirements))
}

fn parse_millis(token: Option<&str>, what: &str) -> std::result::Result<Duration, String> {
    let token = token.ok_or_else(|| format!("task line is missing its {what}"))?;
    token
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("{what} '{token}' is not a non-negative integer"))
}

/// Parse a `name:value` token.
fn parse_pair(token: &str) -> std::result::Result<(String, u64), String> {
    let (name, value) = token
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got '{token}'"))?;

    if name.is_empty() {
        return Err(format!("missing resource name in '{token}'"));
    }

    let value = value
        .parse::<u64>()
        .map_err(|_| format!("value in '{token}' is not a non-negative integer"))?;

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resources_and_tasks() {
        let input = "\
# a comment
resources cpu:2 disk:1

task build 100 50 cpu:1 disk:1
task lint 10 0 cpu:1
";
        let workload = parse_str(input).unwrap();

        assert_eq!(workload.resources.get("cpu"), Some(&2));
        assert_eq!(workload.resources.get("disk"), Some(&1));
        assert_eq!(workload.tasks.len(), 2);

        let build = &workload.tasks[0];
        assert_eq!(build.name, "build");
        assert_eq!(build.busy, Duration::from_millis(100));
        assert_eq!(build.idle, Duration::from_millis(50));
        assert_eq!(build.requirements.amount_of("cpu"), 1);
        assert_eq!(build.requirements.amount_of("disk"), 1);
        assert_eq!(workload.tasks[1].name, "lint");
    }

    #[test]
    fn later_resource_definition_replaces_earlier() {
        let workload = parse_str("resources cpu:2\nresources cpu:5 mem:1\n").unwrap();
        assert_eq!(workload.resources.get("cpu"), Some(&5));
        assert_eq!(workload.resources.get("mem"), Some(&1));
    }

    #[test]
    fn task_without_requirements_is_allowed() {
        let workload = parse_str("task solo 5 5\n").unwrap();
        assert!(workload.tasks[0].requirements.is_empty());
    }

    #[test]
    fn repeated_requirement_is_merged() {
        let workload = parse_str("resources cpu:3\ntask t 1 1 cpu:1 cpu:2\n").unwrap();
        assert_eq!(workload.tasks[0].requirements.len(), 1);
        assert_eq!(workload.tasks[0].requirements.amount_of("cpu"), 3);
    }

    #[test]
    fn unrecognized_directive_reports_line_number() {
        let err = parse_str("resources cpu:1\n\nbogus line here\ntask t 1 1\n").unwrap_err();
        match err {
            ContendError::Parse {
                line,
                message,
                text,
            } => {
                assert_eq!(line, 3);
                assert!(message.contains("bogus"));
                assert_eq!(text, "bogus line here");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn indented_comment_and_blank_lines_are_skipped() {
        let input = "resources cpu:1\n   # indented note\n\t#tabbed\n   \ntask t 1 1 cpu:1\n";
        let workload = parse_str(input).unwrap();

        assert_eq!(workload.resources.len(), 1);
        assert_eq!(workload.tasks.len(), 1);
        assert_eq!(workload.tasks[0].name, "t");
    }

    #[test]
    fn hash_after_a_directive_is_not_a_comment() {
        let err = parse_str("resources cpu:1 # trailing\n").unwrap_err();
        assert!(matches!(err, ContendError::Parse { line: 1, .. }));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let cases = [
            "resources cpu",
            "resources :2",
            "resources cpu:-1",
            "resources cpu:1:2",
            "task",
            "task t",
            "task t 10",
            "task t ten 10",
            "task t 10 5 cpu",
            "task t 10 5 cpu:x",
        ];

        for case in cases {
            let err = parse_str(case).unwrap_err();
            assert!(
                matches!(err, ContendError::Parse { line: 1, .. }),
                "expected parse error for {case:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, ContendError::Io { .. }));
    }
}
