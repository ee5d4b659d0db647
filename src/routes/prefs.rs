use rocket::response::Redirect;

use crate::guards::PagePrefs;
use crate::i18n::Language;
use crate::routes::safe_next;
use crate::theme::Theme;

#[get("/theme/toggle?<next>")]
pub fn theme_toggle(next: Option<&str>, mut prefs: PagePrefs<'_>) -> Redirect {
    prefs.theme.toggle();
    Redirect::to(safe_next(next))
}

#[get("/theme/<mode>?<next>", rank = 2)]
pub fn theme_set(mode: &str, next: Option<&str>, mut prefs: PagePrefs<'_>) -> Option<Redirect> {
    let theme = Theme::parse(mode)?;
    prefs.theme.set_theme(theme);
    Some(Redirect::to(safe_next(next)))
}

/// Persist the language and go back with `lang` set on the target.
#[get("/lang/<code>?<next>")]
pub fn language_set(code: &str, next: Option<&str>, mut prefs: PagePrefs<'_>) -> Option<Redirect> {
    let lang = Language::parse(code)?;
    let target = prefs.language.switch_language(lang, &safe_next(next));
    Some(Redirect::to(target))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![theme_toggle, theme_set, language_set]
}
