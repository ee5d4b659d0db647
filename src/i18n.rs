//! Two-locale UI text and the switcher that applies it to tagged markup.
//!
//! Elements carry `data-lang="section.key"`; [`LanguageSwitcher::apply`]
//! replaces their text (or placeholder/value for inputs) with the entry for
//! the active locale.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::events::{Emitter, SubscriptionId};
use crate::prefs::Storage;
use crate::render::html_escape;

pub const LANGUAGE_KEY: &str = "portfolioLanguage";
pub const LANG_PARAM: &str = "lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Uz,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Uz];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "uz" => Some(Language::Uz),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Uz => "uz",
        }
    }

    /// Label shown in the language selector.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Uz => "UZ",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Uz => "O'zbekcha",
        }
    }
}

fn dictionary() -> &'static Value {
    static DICT: OnceLock<Value> = OnceLock::new();
    DICT.get_or_init(|| {
        json!({
            "en": {
                "nav": {
                    "home": "Home",
                    "about": "About Me",
                    "blog": "Blog",
                    "projects": "Projects",
                    "skills": "Skills",
                    "contact": "Contact"
                },
                "hero": {
                    "greeting": "Hi, I'm",
                    "subtitle": "Full-stack developer crafting reliable, scalable web applications with modern technologies.",
                    "viewProjects": "View Projects",
                    "githubRepos": "GitHub Repos"
                },
                "about": {
                    "title": "About Me",
                    "description": "I am a software engineer specialized in creating efficient, optimized, and user-friendly solutions. Through my portfolio projects, you can explore my programming skills, creativity, and passion for technology. In every project, I focus on delivering both quality and impactful results.",
                    "downloadCV": "Download CV",
                    "features": {
                        "cleanCode": {
                            "title": "Clean Code",
                            "description": "Writing maintainable, well-documented code"
                        },
                        "performance": {
                            "title": "Performance",
                            "description": "Optimizing for speed and efficiency"
                        },
                        "responsive": {
                            "title": "Responsive",
                            "description": "Mobile-first design approach"
                        }
                    }
                },
                "blog": {
                    "title": "Blog",
                    "description": "Notes, write-ups and articles."
                },
                "projects": {
                    "title": "Featured Projects",
                    "description": "A selection of my recent work showcasing different technologies and solutions."
                },
                "skills": {
                    "title": "Skills",
                    "description": "A quick overview of my technical skills and proficiency levels."
                },
                "github": {
                    "title": "GitHub Repositories",
                    "description": "Explore my open-source contributions and personal projects."
                },
                "contact": {
                    "title": "Contact Me",
                    "description": "Have a question or want to work together? Send me a message.",
                    "form": {
                        "title": "Send a Message",
                        "firstName": "First Name *",
                        "lastName": "Last Name *",
                        "phoneNumber": "Phone Number *",
                        "message": "Message *",
                        "messagePlaceholder": "Tell me about your project, question, or how I can help you...",
                        "sendMessage": "Send Message"
                    }
                },
                "footer": {
                    "copyright": "All rights reserved."
                }
            },
            "uz": {
                "nav": {
                    "home": "Bosh sahifa",
                    "about": "Men haqimda",
                    "blog": "Blog",
                    "projects": "Loyihalar",
                    "skills": "Ko'nikmalar",
                    "contact": "Aloqa"
                },
                "hero": {
                    "greeting": "Salom, men",
                    "subtitle": "Zamonaviy texnologiyalar bilan ishonchli va kengaytiriladigan veb-ilovalar yaratuvchi full-stack dasturchi.",
                    "viewProjects": "Loyihalarni ko'rish",
                    "githubRepos": "GitHub Repolar"
                },
                "about": {
                    "title": "Men haqida",
                    "description": "Men samarali, optimallashtirilgan va foydalanuvchilar uchun qulay yechimlar yaratishda ixtisoslashgan dastur muhandisiman. Portfoliomdagi loyihalar orqali mening dasturlash ko'nikmalarim, ijodkorligim va texnologiyaga bo'lgan ishtiyoqimni ko'rishingiz mumkin. Har bir loyihada men sifat va samarali natijalarni taqdim etishga e'tibor beraman.",
                    "downloadCV": "CV yuklab olish",
                    "features": {
                        "cleanCode": {
                            "title": "Toza kod",
                            "description": "Saqlash mumkin, yaxshi hujjatlashtirilgan kod yozish"
                        },
                        "performance": {
                            "title": "Samaradorlik",
                            "description": "Tezlik va samaradorlik uchun optimallashtirish"
                        },
                        "responsive": {
                            "title": "Moslashuvchan",
                            "description": "Mobil birinchi dizayn yondashuvi"
                        }
                    }
                },
                "blog": {
                    "title": "Blog",
                    "description": "Qaydlar, tahlillar va maqolalar."
                },
                "projects": {
                    "title": "Asosiy loyihalar",
                    "description": "Turli texnologiyalar va yechimlarni ko'rsatadigan so'nggi ishlarimning tanlovi."
                },
                "skills": {
                    "title": "Ko'nikmalar",
                    "description": "Mening texnik ko'nikmalarim va darajalarim haqida qisqacha ma'lumot."
                },
                "github": {
                    "title": "GitHub Repolar",
                    "description": "Mening ochiq manba hissasi va shaxsiy loyihalarimni kashf eting."
                },
                "contact": {
                    "title": "Men bilan bog'laning",
                    "description": "Savolingiz bormi yoki birgalikda ishlashni xohlaysizmi? Menga xabar yuboring.",
                    "form": {
                        "title": "Xabar yuborish",
                        "firstName": "Ism *",
                        "lastName": "Familiya *",
                        "phoneNumber": "Telefon raqami *",
                        "message": "Xabar *",
                        "messagePlaceholder": "Loyihangiz, savolingiz yoki men qanday yordam bera olishim haqida gapirib bering...",
                        "sendMessage": "Xabar yuborish"
                    }
                },
                "footer": {
                    "copyright": "Barcha huquqlar himoyalangan."
                }
            }
        })
    })
}

/// Look up a dotted key path (`contact.form.title`) for a locale.
pub fn t(lang: Language, key: &str) -> Option<&'static str> {
    let mut node = dictionary().get(lang.code())?;
    for part in key.split('.') {
        node = node.get(part)?;
    }
    node.as_str()
}

/// Browser-locale step of the resolution order. Whatever locale the browser
/// reports, this resolves to `default`.
pub fn browser_language(locale: Option<&str>, default: Language) -> Language {
    if let Some(locale) = locale {
        log::debug!("[i18n] browser locale {} -> {}", locale, default.code());
    }
    default
}

/// URL parameter, then stored preference, then browser heuristic.
pub fn resolve_language<S: Storage>(
    url_param: Option<&str>,
    storage: &S,
    browser_locale: Option<&str>,
    default: Language,
) -> Language {
    if let Some(lang) = url_param.and_then(Language::parse) {
        return lang;
    }
    if let Some(lang) = storage
        .get_item(LANGUAGE_KEY)
        .and_then(|v| Language::parse(&v))
    {
        return lang;
    }
    browser_language(browser_locale, default)
}

/// Return `location` (a path with optional query) with `lang` set,
/// replacing any existing value and keeping the other parameters.
pub fn with_lang_param(location: &str, lang: Language) -> String {
    let base = match url::Url::parse("http://localhost/") {
        Ok(u) => u,
        Err(_) => return location.to_string(),
    };
    let mut url = match base.join(location) {
        Ok(u) => u,
        Err(_) => return format!("/?{}={}", LANG_PARAM, lang.code()),
    };
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != LANG_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair(LANG_PARAM, lang.code());
    match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageChanged {
    pub language: Language,
}

pub struct LanguageSwitcher<S: Storage> {
    storage: S,
    current: Language,
    listeners: Emitter<LanguageChanged>,
}

impl<S: Storage> LanguageSwitcher<S> {
    pub fn new(
        storage: S,
        url_param: Option<&str>,
        browser_locale: Option<&str>,
        default: Language,
    ) -> Self {
        let current = resolve_language(url_param, &storage, browser_locale, default);
        LanguageSwitcher {
            storage,
            current,
            listeners: Emitter::new(),
        }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn t(&self, key: &str) -> Option<&'static str> {
        t(self.current, key)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Activate `lang`, persist it and notify subscribers. Returns
    /// `location` rewritten to carry the new `lang` parameter.
    pub fn switch_language(&mut self, lang: Language, location: &str) -> String {
        self.current = lang;
        self.storage.set_item(LANGUAGE_KEY, lang.code());
        self.listeners.emit(&LanguageChanged { language: lang });
        log::debug!("[i18n] switched to {}", lang.code());
        with_lang_param(location, lang)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LanguageChanged) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Rewrite every `data-lang` tagged node in `html` for the active locale.
    pub fn apply(&self, html: &str) -> String {
        apply_translations(html, self.current)
    }
}

fn input_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<input\b([^>]*?\bdata-lang="([^"]+)"[^>]*?)(\s*/?)>"#)
            .expect("static regex")
    })
}

fn element_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"<([a-zA-Z][a-zA-Z0-9]*)\b([^>]*\bdata-lang="([^"]+)"[^>]*)>([^<]*)</([a-zA-Z][a-zA-Z0-9]*)>"#,
        )
        .expect("static regex")
    })
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bplaceholder="[^"]*""#)
            .expect("static regex")
    })
}

fn value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\bvalue="[^"]*""#)
            .expect("static regex")
    })
}

fn set_attr(attrs: &str, re: &Regex, name: &str, text: &str) -> String {
    let attr = format!("{}=\"{}\"", name, html_escape(text));
    if re.is_match(attrs) {
        re.replace(attrs, regex::NoExpand(&attr)).into_owned()
    } else {
        format!("{} {}", attrs, attr)
    }
}

/// Translate `data-lang` tagged nodes for `lang`. Only text-only elements
/// are rewritten: a tagged element with child markup, such as an icon
/// before the label, is left as-is, so tag the inner `<span>` instead.
/// Unknown keys keep their markup.
pub fn apply_translations(html: &str, lang: Language) -> String {
    let inputs = input_re().replace_all(html, |caps: &Captures| {
        let attrs = &caps[1];
        let Some(text) = t(lang, &caps[2]) else {
            return caps[0].to_string();
        };
        let attrs = if placeholder_re().is_match(attrs) {
            set_attr(attrs, placeholder_re(), "placeholder", text)
        } else {
            set_attr(attrs, value_re(), "value", text)
        };
        format!("<input{}{}>", attrs, &caps[3])
    });

    element_re()
        .replace_all(&inputs, |caps: &Captures| {
            let tag = &caps[1];
            let attrs = &caps[2];
            if !tag.eq_ignore_ascii_case(&caps[5]) {
                return caps[0].to_string();
            }
            let Some(text) = t(lang, &caps[3]) else {
                return caps[0].to_string();
            };
            if tag.eq_ignore_ascii_case("textarea") && placeholder_re().is_match(attrs) {
                let attrs = set_attr(attrs, placeholder_re(), "placeholder", text);
                return format!("<{}{}>{}</{}>", tag, attrs, &caps[4], tag);
            }
            format!("<{}{}>{}</{}>", tag, attrs, html_escape(text), tag)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStorage;

    #[test]
    fn test_nested_key_lookup() {
        assert_eq!(t(Language::En, "nav.home"), Some("Home"));
        assert_eq!(t(Language::Uz, "nav.home"), Some("Bosh sahifa"));
        assert_eq!(
            t(Language::En, "about.features.cleanCode.title"),
            Some("Clean Code")
        );
        assert_eq!(t(Language::En, "nav.missing"), None);
        assert_eq!(t(Language::En, "nav"), None);
    }

    #[test]
    fn test_every_english_key_has_uzbek_entry() {
        fn walk(prefix: &str, node: &Value, out: &mut Vec<String>) {
            if let Value::Object(map) = node {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", prefix, k)
                    };
                    walk(&key, v, out);
                }
            } else {
                out.push(prefix.to_string());
            }
        }
        let mut keys = Vec::new();
        walk("", &dictionary()["en"], &mut keys);
        assert!(!keys.is_empty());
        for key in keys {
            assert!(t(Language::Uz, &key).is_some(), "missing uz entry for {}", key);
        }
    }

    #[test]
    fn test_with_lang_param_replaces_existing() {
        assert_eq!(with_lang_param("/", Language::Uz), "/?lang=uz");
        assert_eq!(
            with_lang_param("/blog?category=Rust&lang=en", Language::Uz),
            "/blog?category=Rust&lang=uz"
        );
    }

    #[test]
    fn test_apply_rewrites_placeholder_and_value() {
        let html = r#"<textarea id="message" data-lang="contact.form.messagePlaceholder" placeholder="x"></textarea><input type="submit" data-lang="contact.form.sendMessage">"#;
        let out = apply_translations(html, Language::Uz);
        assert!(out.contains("placeholder=\"Loyihangiz, savolingiz"));
        assert!(out.contains("value=\"Xabar yuborish\""));
    }

    #[test]
    fn test_apply_skips_elements_with_child_markup() {
        let nested = r#"<a data-lang="nav.home"><i class="bi bi-house"></i> Home</a>"#;
        assert_eq!(apply_translations(nested, Language::Uz), nested);

        let wrapped = r#"<a href="/"><i class="bi bi-house"></i> <span data-lang="nav.home">Home</span></a>"#;
        assert!(apply_translations(wrapped, Language::Uz).contains(">Bosh sahifa</span>"));
    }

    #[test]
    fn test_switcher_ignores_unknown_url_param() {
        let storage = MemoryStorage::new();
        let sw = LanguageSwitcher::new(storage, Some("fr"), None, Language::En);
        assert_eq!(sw.current(), Language::En);
    }
}
