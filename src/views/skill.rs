use crate::binder::{load_more_control, FilterBar};
use crate::listing::ListController;
use crate::models::skill::{Skill, SkillGroup};
use crate::render::{alert, html_escape, AlertKind};
use crate::views::{row, state_alert, ListMessages};

pub const MESSAGES: ListMessages = ListMessages {
    failed: "Failed to load skills. Please try again later.",
    empty: "No skills found. Add some skills through the admin panel.",
    no_match: "No skills found for the selected level.",
};

#[derive(Debug, Clone, PartialEq)]
pub struct SkillCard {
    pub name: String,
    pub level: u8,
    pub label: &'static str,
    pub color: &'static str,
}

impl SkillCard {
    pub fn build(skill: &Skill) -> Self {
        let tier = skill.tier();
        SkillCard {
            name: skill.name.clone(),
            level: skill.level,
            label: tier.label(),
            color: tier.color(),
        }
    }
}

pub fn render_skill_card(card: &SkillCard) -> String {
    format!(
        r#"<div class="col-lg-4 col-md-4">
    <div class="card h-100 hover-lift">
        <div class="card-body">
            <div class="skill-item">
                <div class="skill-header">
                    <span class="skill-name">{name}</span>
                    <span class="skill-level badge bg-{color}">{label}</span>
                </div>
                <div class="progress">
                    <div class="progress-bar bg-{color}" role="progressbar" style="width: {level}%" aria-valuenow="{level}" aria-valuemin="0" aria-valuemax="100"></div>
                </div>
                <div class="text-end mt-2"><small class="text-muted">{level}%</small></div>
            </div>
        </div>
    </div>
</div>"#,
        name = html_escape(&card.name),
        color = card.color,
        label = card.label,
        level = card.level,
    )
}

/// Visible skills grouped into level sections; empty sections are left out.
pub fn render_skill_groups(skills: &[&Skill]) -> String {
    let mut html = String::new();
    for group in SkillGroup::ALL {
        let cards: String = skills
            .iter()
            .filter(|s| s.group() == group)
            .map(|s| render_skill_card(&SkillCard::build(s)))
            .collect();
        if cards.is_empty() {
            continue;
        }
        let (text, icon) = group.style();
        html.push_str(&format!(
            r#"<div class="col-12 mb-4">
    <h3 class="{text} mb-3"><i class="bi {icon} me-2"></i>{heading}</h3>
    <div class="row g-4">{cards}</div>
</div>"#,
            text = text,
            icon = icon,
            heading = group.heading(),
            cards = cards,
        ));
    }
    html
}

pub fn render_skill_list(ctl: &ListController<Skill>, bar: &FilterBar, location: &str) -> String {
    let mut html = String::new();
    if let Some(alert) = state_alert(ctl.load_state(), &MESSAGES, location) {
        html.push_str(&row(&alert));
        return html;
    }

    html.push_str(&bar.render("/skills"));
    let view = ctl.compute_view();
    if view.items.is_empty() {
        html.push_str(&row(&alert(AlertKind::Info, MESSAGES.no_match)));
        return html;
    }
    html.push_str(&format!(r#"<div class="row">{}</div>"#, render_skill_groups(&view.items)));
    if let Some(more) = load_more_control(bar, ctl, "/skills") {
        html.push_str(&more);
    }
    html
}
