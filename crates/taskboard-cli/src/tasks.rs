use color_eyre::Result;
use taskboard_core::{
    ops::NewTask,
    query::TaskQuery,
    repository::{RepoError, TaskRepository},
    stats::Stats,
    tasks::{is_overdue, Task},
};
use taskboard_task::StoreTaskRepo;

use crate::{
    cli::{ListArgs, TaskCommand},
    config, storage,
};

/// Execute a task subcommand against the configured JSON document.
pub async fn handle(cmd: TaskCommand, config: &config::Config) -> Result<()> {
    let repo = StoreTaskRepo::new(storage::store_from_config(config)?);
    let output = run(cmd, &repo).await?;
    print!("{output}");
    Ok(())
}

/// Runs one command and returns what should be printed.
pub async fn run<R: TaskRepository>(cmd: TaskCommand, repo: &R) -> Result<String> {
    let mut out = String::new();
    match cmd {
        TaskCommand::List(args) => {
            let view = repo.view(&query_from(args)).await.map_err(report)?;
            if view.tasks.is_empty() {
                out.push_str("No tasks to show. Add one with `taskboard task add <title>`.\n");
            }
            for task in &view.tasks {
                out.push_str(&format_task(task, is_overdue(task)));
            }
            out.push_str(&format_stats(&view.stats));
            out.push_str(&format!("shown: {}\n", view.tasks.len()));
        }
        TaskCommand::Add {
            title,
            description,
            priority,
            due,
        } => {
            let input = NewTask {
                title,
                description,
                priority,
                due_date: due,
            };
            let task = repo.create(input).await.map_err(report)?;
            out.push_str(&format!("Created task {}: {}\n", task.id, task.title));
        }
        TaskCommand::Advance { id } => {
            let task = repo.advance(id).await.map_err(report)?;
            out.push_str(&format!("Task {} is now {}\n", task.id, task.status));
        }
        TaskCommand::Delete { id } => {
            if repo.delete(id).await.map_err(report)? {
                out.push_str(&format!("Deleted task {id}\n"));
            } else {
                out.push_str(&format!("No task with id {id}, nothing deleted\n"));
            }
        }
        TaskCommand::Stats => {
            let view = repo.view(&TaskQuery::default()).await.map_err(report)?;
            out.push_str(&format_stats(&view.stats));
        }
    }
    Ok(out)
}

fn query_from(args: ListArgs) -> TaskQuery {
    TaskQuery {
        keyword: args.query,
        status: args.status,
        priority: args.priority,
    }
}

fn report(err: RepoError) -> color_eyre::Report {
    color_eyre::eyre::eyre!(err.to_string())
}

pub fn format_task(task: &Task, overdue: bool) -> String {
    let mut line = format!(
        "{:>4} [{}] [{}] {}",
        task.id,
        task.status,
        task.priority,
        task.title
    );
    if !task.due_date.is_empty() {
        line.push_str(&format!(" (due {})", task.due_date));
    }
    if overdue {
        line.push_str(" OVERDUE");
    }
    line.push('\n');
    if !task.description.is_empty() {
        line.push_str(&format!("       {}\n", task.description));
    }
    line
}

pub fn format_stats(stats: &Stats) -> String {
    format!(
        "total: {}  done: {}  done%: {}%  overdue: {}\n",
        stats.total, stats.done, stats.percent_done, stats.overdue
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskboard_core::{
        storage::InMemoryTaskStore,
        tasks::{Priority, TaskStatus},
    };

    use super::*;

    fn add(title: &str, due: &str) -> TaskCommand {
        TaskCommand::Add {
            title: title.into(),
            description: String::new(),
            priority: "high".into(),
            due: due.into(),
        }
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let repo = StoreTaskRepo::new(InMemoryTaskStore::new());
        let created = run(add("Example", ""), &repo).await.expect("add");
        assert_eq!(created, "Created task 1: Example\n");

        let listed = run(TaskCommand::List(ListArgs::default()), &repo)
            .await
            .expect("list");
        assert!(listed.contains("[todo] [high] Example"));
        assert!(listed.contains("total: 1  done: 0  done%: 0%  overdue: 0"));
        assert!(listed.ends_with("shown: 1\n"));
    }

    #[tokio::test]
    async fn add_reports_validation_errors() {
        let repo = StoreTaskRepo::new(InMemoryTaskStore::new());
        let err = run(add("Pay rent", "not-a-date"), &repo)
            .await
            .expect_err("invalid deadline");
        assert!(err.to_string().contains("invalid deadline"));
        assert!(repo.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn advance_and_delete_messages() {
        let repo = StoreTaskRepo::new(InMemoryTaskStore::new());
        run(add("Ship", ""), &repo).await.expect("add");

        let advanced = run(TaskCommand::Advance { id: 1 }, &repo).await.expect("advance");
        assert_eq!(advanced, "Task 1 is now in_progress\n");

        let err = run(TaskCommand::Advance { id: 9 }, &repo)
            .await
            .expect_err("unknown id");
        assert_eq!(err.to_string(), "no task with id 9");

        let missing = run(TaskCommand::Delete { id: 9 }, &repo).await.expect("delete");
        assert_eq!(missing, "No task with id 9, nothing deleted\n");
        let deleted = run(TaskCommand::Delete { id: 1 }, &repo).await.expect("delete");
        assert_eq!(deleted, "Deleted task 1\n");
    }

    #[tokio::test]
    async fn list_applies_filters() {
        let repo = StoreTaskRepo::new(InMemoryTaskStore::new());
        run(add("Rapport annuel", ""), &repo).await.expect("add");
        run(add("Courses", ""), &repo).await.expect("add");

        let args = ListArgs {
            query: "RAPPORT".into(),
            ..ListArgs::default()
        };
        let listed = run(TaskCommand::List(args), &repo).await.expect("list");
        assert!(listed.contains("Rapport annuel"));
        assert!(!listed.contains("Courses"));
        assert!(listed.contains("total: 2"));
        assert!(listed.ends_with("shown: 1\n"));
    }

    #[test]
    fn formats_overdue_task_with_description() {
        let task = Task {
            id: 12,
            title: "Renew passport".into(),
            description: "bring photos".into(),
            priority: Priority::Low,
            status: TaskStatus::Todo,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            due_date: "2024-02-01".into(),
        };
        assert_eq!(
            format_task(&task, true),
            "  12 [todo] [low] Renew passport (due 2024-02-01) OVERDUE\n       bring photos\n"
        );
    }

    #[test]
    fn formats_stats_line() {
        let stats = Stats {
            total: 3,
            done: 1,
            overdue: 2,
            percent_done: 33.3,
        };
        assert_eq!(
            format_stats(&stats),
            "total: 3  done: 1  done%: 33.3%  overdue: 2\n"
        );
    }
}
