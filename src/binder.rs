//! Filter and load-more controls wired to a [`ListController`].
//!
//! A "click" here is a request carrying the filter parameter and/or a
//! `shown` count; the binder replays it against a fresh controller.

use crate::listing::{is_all, ListController, Listable, ALL};
use crate::models::category::Category;
use crate::models::project::FILTER_KEYWORDS;
use crate::models::skill::SkillGroup;
use crate::render::{html_escape, load_more_button, query_href};

pub const SHOWN_PARAM: &str = "shown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// A row of sibling filter controls. At most one is active.
#[derive(Debug, Clone)]
pub struct FilterBar {
    param: &'static str,
    controls: Vec<FilterControl>,
}

impl FilterBar {
    /// `All` first and active, then `options` as (value, label).
    pub fn new<I>(param: &'static str, options: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut controls = vec![FilterControl {
            value: ALL.to_string(),
            label: "All".to_string(),
            active: true,
        }];
        controls.extend(options.into_iter().map(|(value, label)| FilterControl {
            value,
            label,
            active: false,
        }));
        FilterBar { param, controls }
    }

    pub fn for_categories(categories: &[Category]) -> Self {
        Self::new(
            "category",
            categories
                .iter()
                .map(|c| (c.name.clone(), c.name.clone())),
        )
    }

    pub fn for_projects() -> Self {
        Self::new(
            "filter",
            FILTER_KEYWORDS.iter().map(|(tag, _)| {
                let label = match *tag {
                    "api" => "API".to_string(),
                    other => {
                        let mut chars = other.chars();
                        match chars.next() {
                            Some(c) => c.to_uppercase().chain(chars).collect(),
                            None => String::new(),
                        }
                    }
                };
                (tag.to_string(), label)
            }),
        )
    }

    pub fn for_skills() -> Self {
        Self::new(
            "level",
            SkillGroup::ALL
                .iter()
                .map(|g| (g.slug().to_string(), g.heading().to_string())),
        )
    }

    pub fn param(&self) -> &'static str {
        self.param
    }

    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub fn active(&self) -> Option<&FilterControl> {
        self.controls.iter().find(|c| c.active)
    }

    /// Deactivate every control, then activate the one whose value matches
    /// (case-insensitively). Returns whether one matched.
    pub fn activate(&mut self, value: &str) -> bool {
        let target = if is_all(value) {
            ALL.to_string()
        } else {
            value.trim().to_lowercase()
        };
        let mut found = false;
        for control in &mut self.controls {
            control.active = !found && control.value.to_lowercase() == target;
            found |= control.active;
        }
        found
    }

    pub fn render(&self, path: &str) -> String {
        let mut html = format!(
            r#"<div class="filter-buttons btn-group flex-wrap mb-4" role="group" id="{}Filters">"#,
            self.param
        );
        for control in &self.controls {
            let query_value = if control.value == ALL { "" } else { control.value.as_str() };
            html.push_str(&format!(
                r#"<a class="btn btn-outline-primary{active}" data-{param}="{value}" href="{href}">{label}</a>"#,
                active = if control.active { " active" } else { "" },
                param = self.param,
                value = html_escape(&control.value),
                href = html_escape(&query_href(path, &[(self.param, query_value)])),
                label = html_escape(&control.label),
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// Activate the clicked control and apply its value as the list filter.
pub fn click_filter<T: Listable>(bar: &mut FilterBar, ctl: &mut ListController<T>, value: &str) {
    if !bar.activate(value) {
        log::debug!("[list] no {} control for {:?}", bar.param(), value);
    }
    ctl.set_filter(value);
}

pub fn click_load_more<T: Listable>(ctl: &mut ListController<T>) -> bool {
    ctl.load_more()
}

/// Replay load-more clicks until at least `shown` items are displayed or
/// the control would hide.
pub fn reveal<T: Listable>(ctl: &mut ListController<T>, shown: usize) {
    while ctl.displayed() < shown && click_load_more(ctl) {}
}

/// Link that asks for one more page with the current filter kept.
pub fn load_more_control<T: Listable>(
    bar: &FilterBar,
    ctl: &ListController<T>,
    path: &str,
) -> Option<String> {
    if !ctl.compute_view().has_more {
        return None;
    }
    let filter = if is_all(ctl.filter()) { "" } else { ctl.filter() };
    let shown = (ctl.displayed() + ctl.page_size()).to_string();
    Some(load_more_button(&query_href(
        path,
        &[(bar.param(), filter), (SHOWN_PARAM, &shown)],
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Num(u32);

    impl Listable for Num {
        fn matches(&self, filter: &str, _categories: &[Category]) -> bool {
            match filter {
                "even" => self.0 % 2 == 0,
                _ => true,
            }
        }
    }

    fn controller(n: u32) -> ListController<Num> {
        ListController::with_items(6, (0..n).map(Num).collect(), Vec::new())
    }

    #[test]
    fn test_activate_is_exclusive_and_case_insensitive() {
        let cats = vec![
            Category { id: 1, name: "Rust".into() },
            Category { id: 2, name: "Travel".into() },
        ];
        let mut bar = FilterBar::for_categories(&cats);
        assert_eq!(bar.active().map(|c| c.value.as_str()), Some("all"));
        assert!(bar.activate("rust"));
        assert_eq!(bar.controls().iter().filter(|c| c.active).count(), 1);
        assert_eq!(bar.active().map(|c| c.label.as_str()), Some("Rust"));
        assert!(!bar.activate("cooking"));
        assert!(bar.active().is_none());
        assert!(bar.activate(""));
        assert_eq!(bar.active().map(|c| c.value.as_str()), Some("all"));
    }

    #[test]
    fn test_click_filter_resets_pagination() {
        let mut ctl = controller(30);
        let mut bar = FilterBar::new("filter", vec![("even".into(), "Even".into())]);
        reveal(&mut ctl, 18);
        assert_eq!(ctl.displayed(), 18);
        click_filter(&mut bar, &mut ctl, "even");
        assert_eq!(ctl.displayed(), 6);
        assert_eq!(ctl.filter(), "even");
    }

    #[test]
    fn test_reveal_stops_when_control_hides() {
        let mut ctl = controller(8);
        reveal(&mut ctl, 600);
        assert_eq!(ctl.displayed(), 12);
        assert_eq!(ctl.compute_view().items.len(), 8);
        assert!(!click_load_more(&mut ctl));
    }

    #[test]
    fn test_load_more_control_keeps_filter() {
        let mut ctl = controller(30);
        let mut bar = FilterBar::new("filter", vec![("even".into(), "Even".into())]);
        click_filter(&mut bar, &mut ctl, "even");
        let html = load_more_control(&bar, &ctl, "/projects").unwrap();
        assert!(html.contains(r#"href="/projects?filter=even&amp;shown=12""#));

        let small = controller(3);
        assert!(load_more_control(&FilterBar::for_projects(), &small, "/projects").is_none());
    }

    #[test]
    fn test_project_and_skill_bars() {
        let labels: Vec<_> = FilterBar::for_projects()
            .controls()
            .iter()
            .map(|c| c.label.clone())
            .collect();
        assert_eq!(labels, vec!["All", "Web", "API", "Mobile"]);
        let skills = FilterBar::for_skills();
        assert_eq!(skills.param(), "level");
        assert_eq!(skills.controls().len(), 5);
    }
}
