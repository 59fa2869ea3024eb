//! Storefront locales.
//!
//! A locale is a language + country pair (`en-us`, `fr-ca`) plus the currency
//! prices are shown in. Non-default locales are selected by a URL prefix:
//! `/fr-ca/collections/shirts`. The default locale is served unprefixed.

use anyhow::{Result, bail};
use serde::Serialize;

/// Country codes whose storefront currency is the euro.
const EUROZONE: &[&str] = &["DE", "FR", "ES", "IT", "NL", "BE", "AT", "IE", "PT", "FI"];

/// Language, country, and currency for one request.
///
/// Codes are stored uppercase, the form the backend expects in its
/// `@inContext` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub language: String,
    pub country: String,
    pub currency: String,
}

impl Locale {
    /// Parse a `language-country` tag, case-insensitively.
    ///
    /// The currency is derived from the country, falling back to
    /// `default_currency` for countries without a known currency.
    pub fn parse(tag: &str, default_currency: &str) -> Option<Self> {
        let (language, country) = tag.trim().split_once('-')?;
        if !is_alpha_code(language) || !is_alpha_code(country) {
            return None;
        }

        let country = country.to_ascii_uppercase();
        let currency = currency_for_country(&country)
            .unwrap_or(default_currency)
            .to_ascii_uppercase();

        Some(Self {
            language: language.to_ascii_uppercase(),
            country,
            currency,
        })
    }

    /// The URL path prefix for this locale, e.g. `en-ca`.
    pub fn path_prefix(&self) -> String {
        format!(
            "{}-{}",
            self.language.to_ascii_lowercase(),
            self.country.to_ascii_lowercase()
        )
    }
}

fn is_alpha_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Storefront currency for an uppercase ISO country code.
pub fn currency_for_country(country: &str) -> Option<&'static str> {
    match country {
        "US" => Some("USD"),
        "CA" => Some("CAD"),
        "GB" => Some("GBP"),
        "AU" => Some("AUD"),
        "JP" => Some("JPY"),
        c if EUROZONE.contains(&c) => Some("EUR"),
        _ => None,
    }
}

/// Resolves URL locale prefixes against the configured locales.
///
/// Frozen at startup: changing the locale list requires a restart.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    default: Locale,
    others: Vec<Locale>,
}

impl LocaleResolver {
    /// Build from a comma-separated list of tags; the first is the default.
    pub fn parse(list: &str, default_currency: &str) -> Result<Self> {
        let mut locales = Vec::new();
        for tag in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let Some(locale) = Locale::parse(tag, default_currency) else {
                bail!("invalid locale tag '{tag}', expected language-country");
            };
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }

        let mut locales = locales.into_iter();
        let Some(default) = locales.next() else {
            bail!("at least one locale must be configured");
        };

        Ok(Self {
            default,
            others: locales.collect(),
        })
    }

    /// The locale served without a path prefix.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// All configured locales, default first.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        std::iter::once(&self.default).chain(self.others.iter())
    }

    /// Look up a locale by its URL prefix.
    ///
    /// The default locale is matched too, so `/en-us/collections/x` and
    /// `/collections/x` serve the same page.
    pub fn from_path_prefix(&self, prefix: &str) -> Option<&Locale> {
        self.locales()
            .find(|locale| locale.path_prefix().eq_ignore_ascii_case(prefix))
    }
}
