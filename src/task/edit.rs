//! Text-level edits of a task's description
//!
//! Every edit rewrites `description` and immediately re-parses the whole
//! line, so the line fields and the tags read from them never disagree.

use std::ops::Range;

use super::grammar::{self, TagKind};
use super::model::Task;

impl Task {
    /// Remove the first `+project` tag. Returns whether one was removed.
    ///
    /// The line is re-parsed afterwards, so removing a leading tag can turn
    /// the following word into a line field (`+p x marks` becomes completed).
    pub fn remove_project(&mut self, project: &str) -> bool {
        self.remove_tag(TagKind::Project, project)
    }

    /// Remove the first `@context` tag. Returns whether one was removed.
    ///
    /// Like [`Task::remove_project`], a leading removal can expose a date or
    /// the `x` marker to the parser.
    pub fn remove_context(&mut self, context: &str) -> bool {
        self.remove_tag(TagKind::Context, context)
    }

    fn remove_tag(&mut self, kind: TagKind, name: &str) -> bool {
        let Some(description) = &self.description else {
            return false;
        };
        let span = grammar::tag_matches(kind, description)
            .find(|m| m.name.as_str() == name)
            .map(|m| m.span);

        match span {
            Some(span) => {
                self.splice_description(span, "");
                true
            }
            None => false,
        }
    }

    /// Remove `key:value` attributes.
    ///
    /// With a `value`, only pairs carrying that value go; without one, every
    /// occurrence of `key` does. Returns whether anything was removed.
    pub fn remove_attribute(&mut self, key: &str, value: Option<&str>) -> bool {
        let mut removed = false;
        while let Some(span) = self.find_attribute(key, value) {
            self.splice_description(span, "");
            removed = true;
        }
        removed
    }

    fn find_attribute(&self, key: &str, value: Option<&str>) -> Option<Range<usize>> {
        let description = self.description.as_deref()?;
        grammar::keyvalue_matches(description)
            .find(|m| m.key.as_str() == key && value.is_none_or(|v| m.value.as_str() == v))
            .map(|m| m.span)
    }

    /// Replace the value of the first `key:value` with `new_value`.
    pub fn replace_attribute(&mut self, key: &str, value: &str, new_value: &str) -> bool {
        let Some(description) = &self.description else {
            return false;
        };
        let range = grammar::keyvalue_matches(description)
            .find(|m| m.key.as_str() == key && m.value.as_str() == value)
            .map(|m| m.value.range());

        match range {
            Some(range) => {
                self.splice_description(range, new_value);
                true
            }
            None => false,
        }
    }

    /// Rename the first `+project` occurrence.
    pub fn replace_project(&mut self, project: &str, new_project: &str) -> bool {
        self.replace_tag(TagKind::Project, project, new_project)
    }

    /// Rename the first `@context` occurrence.
    pub fn replace_context(&mut self, context: &str, new_context: &str) -> bool {
        self.replace_tag(TagKind::Context, context, new_context)
    }

    fn replace_tag(&mut self, kind: TagKind, name: &str, new_name: &str) -> bool {
        let Some(description) = &self.description else {
            return false;
        };
        let range = grammar::tag_matches(kind, description)
            .find(|m| m.name.as_str() == name)
            .map(|m| m.name.range());

        match range {
            Some(range) => {
                self.splice_description(range, new_name);
                true
            }
            None => false,
        }
    }

    /// Append `+project` to the end of the task.
    pub fn add_project(&mut self, project: &str) {
        self.append(&format!("{}{}", TagKind::Project.sigil(), project));
    }

    /// Append `@context` to the end of the task.
    pub fn add_context(&mut self, context: &str) {
        self.append(&format!("{}{}", TagKind::Context.sigil(), context));
    }

    /// Append `key:value` to the end of the task.
    pub fn add_attribute(&mut self, key: &str, value: &str) {
        self.append(&format!("{}:{}", key, value));
    }

    /// Append `text` to the description, separated by a space.
    pub fn append(&mut self, text: &str) {
        let description = match self.description.take() {
            None => text.to_string(),
            Some(mut description) => {
                if !description.ends_with(' ') {
                    description.push(' ');
                }
                description.push_str(text);
                description
            }
        };
        self.description = Some(description);
        self.refresh();
    }

    fn splice_description(&mut self, range: Range<usize>, replacement: &str) {
        if let Some(description) = &mut self.description {
            description.replace_range(range, replacement);
        }
        self.refresh();
    }

    /// Re-parse the task from its own text.
    fn refresh(&mut self) {
        let line = self.to_text();
        self.reparse(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_remove_project() {
        let mut task = Task::parse("Some +project in @project");
        assert_eq!(task.projects(), vec!["project"]);
        assert_eq!(task.contexts(), vec!["project"]);

        assert!(task.remove_project("project"));
        assert!(task.projects().is_empty());
        assert_eq!(task.contexts(), vec!["project"]);
        assert_eq!(task.to_text(), "Some in @project");
    }

    #[test]
    fn test_remove_only_first_occurrence() {
        let mut task = Task::parse("+a then +a again");
        assert!(task.remove_project("a"));
        assert_eq!(task.description.as_deref(), Some("then +a again"));
        assert_eq!(task.projects(), vec!["a"]);
    }

    #[test]
    fn test_remove_context() {
        let mut task = Task::parse("(A) call @phone about +taxes");
        assert!(task.remove_context("phone"));
        assert_eq!(task.to_text(), "(A) call about +taxes");
    }

    #[test]
    fn test_remove_missing_tag_leaves_description() {
        let mut task = Task::parse("Some +project in @project");
        assert!(!task.remove_project("other"));
        assert!(!task.remove_context("other"));
        assert!(!task.remove_attribute("due", None));
        assert_eq!(task.description.as_deref(), Some("Some +project in @project"));
    }

    #[test]
    fn test_remove_from_blank_task() {
        let mut task = Task::new();
        assert!(!task.remove_project("p"));
        assert!(!task.replace_context("a", "b"));
        assert!(!task.replace_attribute("k", "v", "w"));
        assert!(task.description.is_none());
    }

    #[test]
    fn test_remove_last_tag_clears_description() {
        let mut task = Task::parse("+task");
        assert!(task.remove_project("task"));
        assert!(task.description.is_none());
        assert_eq!(task.to_text(), "");
    }

    #[test]
    fn test_remove_attribute_all_values() {
        let mut task = Task::parse("pay due:today rent due:tomorrow t:later");
        assert!(task.remove_attribute("due", None));
        assert!(task.get_attribute("due").is_empty());
        assert_eq!(task.get_attribute("t"), vec!["later"]);
        assert_eq!(task.to_text(), "pay rent t:later");
    }

    #[test]
    fn test_remove_attribute_single_value() {
        let mut task = Task::parse("pay due:today rent due:tomorrow");
        assert!(task.remove_attribute("due", Some("tomorrow")));
        assert_eq!(task.get_attribute("due"), vec!["today"]);
        assert!(!task.remove_attribute("due", Some("tomorrow")));
    }

    #[test]
    fn test_replace_attribute() {
        let mut task = Task::parse("Important +project due:today due:tomorrow what? t:yesterday");
        assert_eq!(task.get_attribute("due"), vec!["today", "tomorrow"]);

        assert!(!task.replace_attribute("due", "sometime", "tomorrow"));
        assert!(task.replace_attribute("due", "tomorrow", "1995-10-03"));
        assert_eq!(task.get_attribute("due"), vec!["today", "1995-10-03"]);
        assert_eq!(task.get_attribute("t"), vec!["yesterday"]);
        assert_eq!(
            task.to_text(),
            "Important +project due:today due:1995-10-03 what? t:yesterday"
        );
    }

    #[test]
    fn test_replace_project() {
        let mut task = Task::parse("Some +project in @project");
        assert!(task.replace_project("project", "stuff"));
        assert_eq!(task.projects(), vec!["stuff"]);
        assert_eq!(task.contexts(), vec!["project"]);
        assert_eq!(task.to_text(), "Some +stuff in @project");
    }

    #[test]
    fn test_replace_context() {
        let mut task = Task::parse("Some +project in @project");
        assert!(task.replace_context("project", "home"));
        assert_eq!(task.to_text(), "Some +project in @home");
        assert!(!task.replace_context("project", "home"));
    }

    #[test]
    fn test_add_tags() {
        let mut task = Task::parse("fancy task with keywords:of-course");
        assert_eq!(task.attributes().len(), 1);

        task.add_attribute("fruit", "tomato");
        task.add_project("garden");
        task.add_context("outside");

        assert_eq!(task.attributes().len(), 2);
        assert_eq!(task.get_attribute("fruit"), vec!["tomato"]);
        assert_eq!(task.projects(), vec!["garden"]);
        assert_eq!(task.contexts(), vec!["outside"]);
        assert_eq!(
            task.to_text(),
            "fancy task with keywords:of-course fruit:tomato +garden @outside"
        );
    }

    #[test]
    fn test_add_to_blank_task() {
        let mut task = Task::new();
        task.add_project("inbox");
        assert_eq!(task.description.as_deref(), Some("+inbox"));
        assert_eq!(task.projects(), vec!["inbox"]);
    }

    #[test]
    fn test_append_respects_trailing_space() {
        let mut task = Task::new();
        task.description = Some("ends with space ".to_string());
        task.append("more");
        assert_eq!(task.description.as_deref(), Some("ends with space more"));
    }

    #[test]
    fn test_edit_keeps_line_fields() {
        let mut task = Task::parse("(A) 2020-01-01 write report +work");
        task.line_number = Some(2);
        assert!(task.replace_project("work", "office"));
        assert_eq!(task.priority.as_deref(), Some("A"));
        assert_eq!(task.creation_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(task.line_number, Some(2));
    }

    #[test]
    fn test_removing_leading_tag_exposes_line_fields() {
        let mut task = Task::parse("+p x marks the spot");
        assert!(task.remove_project("p"));
        assert!(task.is_completed);
        assert_eq!(task.description.as_deref(), Some("marks the spot"));

        let mut task = Task::parse("@c 2020-01-01 foo");
        assert!(task.remove_context("c"));
        assert_eq!(task.creation_date, NaiveDate::from_ymd_opt(2020, 1, 1));
    }
}
