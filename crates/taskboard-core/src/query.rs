use crate::tasks::{normalize_priority, normalize_status, Task};

/// Keyword plus optional status/priority filters. Empty or absent filters
/// match everything; all present filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub keyword: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        matches_keyword(task, &self.keyword)
            && active(self.status.as_deref())
                .is_none_or(|status| task.status == normalize_status(status))
            && active(self.priority.as_deref())
                .is_none_or(|priority| task.priority == normalize_priority(priority))
    }

    /// Ordered subsequence of `tasks` matching this query.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Case-insensitive substring match against the title or the description.
pub fn matches_keyword(task: &Task, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(&query) || task.description.to_lowercase().contains(&query)
}

/// Free-function form of [`TaskQuery::apply`] over raw filter strings.
pub fn filter(
    tasks: &[Task],
    query: &str,
    status: Option<&str>,
    priority: Option<&str>,
) -> Vec<Task> {
    TaskQuery {
        keyword: query.to_string(),
        status: status.map(str::to_string),
        priority: priority.map(str::to_string),
    }
    .apply(tasks)
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{tests::task, Priority, TaskStatus};

    fn board() -> Vec<Task> {
        let mut a = task(1, "Préparer la réunion", TaskStatus::Todo, "");
        a.description = "Ordre du jour".into();
        a.priority = Priority::High;
        let mut b = task(2, "Groceries", TaskStatus::Done, "");
        b.description = "milk, ÉCLAIRS".into();
        b.priority = Priority::Low;
        let c = task(3, "Release notes", TaskStatus::InProgress, "");
        vec![a, b, c]
    }

    fn ids(tasks: &[Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let tasks = board();
        assert!(matches_keyword(&tasks[0], ""));
        assert!(matches_keyword(&tasks[0], "   "));
        assert_eq!(filter(&tasks, "", Some(""), Some("")), tasks);
        assert_eq!(filter(&tasks, "", None, None), tasks);
    }

    #[test]
    fn empty_collection_filters_to_empty() {
        assert!(filter(&[], "anything", Some(""), Some("")).is_empty());
    }

    #[test]
    fn keyword_is_unicode_case_insensitive() {
        let tasks = board();
        assert_eq!(ids(&filter(&tasks, "PRÉPARER", None, None)), vec![1]);
        assert_eq!(ids(&filter(&tasks, "éclairs", None, None)), vec![2]);
        assert_eq!(ids(&filter(&tasks, " ordre ", None, None)), vec![1]);
        assert!(filter(&tasks, "missing", None, None).is_empty());
    }

    #[test]
    fn status_and_priority_filters_compose() {
        let tasks = board();
        assert_eq!(ids(&filter(&tasks, "", Some("done"), None)), vec![2]);
        assert_eq!(ids(&filter(&tasks, "", None, Some("MEDIUM"))), vec![3]);
        assert!(filter(&tasks, "", Some("done"), Some("high")).is_empty());
        assert_eq!(ids(&filter(&tasks, "re", Some("todo"), Some("high"))), vec![1]);
    }

    #[test]
    fn unknown_filter_values_normalize_before_comparing() {
        let tasks = board();
        assert_eq!(ids(&filter(&tasks, "", Some("whatever"), None)), vec![1]);
    }

    #[test]
    fn preserves_input_order() {
        let mut tasks = board();
        tasks.reverse();
        assert_eq!(ids(&filter(&tasks, "e", None, None)), vec![3, 2, 1]);
    }
}
