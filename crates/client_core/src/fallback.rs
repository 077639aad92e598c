use std::collections::BTreeMap;

use serde::Serialize;
use shared::domain::{AppSettings, Feature, Plan};

use crate::{
    defaults::{
        DefaultContent, FooterContent, HeroContent, NavLink, ResellerContent, SocialLink,
        TrialContent,
    },
    fetch::FetchState,
};

/// Remote data when any has arrived, otherwise `default`. An empty collection
/// counts as arrived.
pub fn resolve<T: Clone>(state: &FetchState<T>, default: &T) -> T {
    state.data.as_ref().unwrap_or(default).clone()
}

pub fn merge_hero(settings: Option<&AppSettings>, defaults: &HeroContent) -> HeroContent {
    let mut hero = defaults.clone();
    let Some(remote) = settings.and_then(|s| s.hero_data.as_ref()) else {
        return hero;
    };

    if let Some(v) = &remote.title {
        hero.title = v.clone();
    }
    if let Some(v) = &remote.subtitle {
        hero.subtitle = v.clone();
    }
    if let Some(v) = &remote.background_image {
        hero.background_image = v.clone();
    }
    if let Some(v) = &remote.cta_text {
        hero.cta_text = v.clone();
    }
    if let Some(v) = &remote.features {
        hero.features = v.clone();
    }
    if let Some(v) = &remote.stats {
        hero.stats = v.clone();
    }
    hero
}

pub fn merge_footer(settings: Option<&AppSettings>, defaults: &FooterContent) -> FooterContent {
    let mut footer = defaults.clone();
    let Some(remote) = settings else {
        return footer;
    };

    if let Some(v) = &remote.company_name {
        footer.company = v.clone();
    }
    if let Some(v) = &remote.company_description {
        footer.description = v.clone();
    }
    if let Some(v) = &remote.contact_email {
        footer.contact_email = Some(v.clone());
    }
    if let Some(v) = &remote.support_email {
        footer.support_email = Some(v.clone());
    }
    if let Some(links) = &remote.social_links {
        footer.social_links = merge_social_links(links, &defaults.social_links);
    }
    footer
}

/// Known networks keep their icon and take the remote target; networks the
/// defaults do not know are appended in name order without an icon.
fn merge_social_links(remote: &BTreeMap<String, String>, defaults: &[SocialLink]) -> Vec<SocialLink> {
    let mut merged: Vec<SocialLink> = defaults.to_vec();
    for (name, href) in remote {
        match merged
            .iter_mut()
            .find(|link| link.name.eq_ignore_ascii_case(name))
        {
            Some(link) => link.href = href.clone(),
            None => merged.push(SocialLink {
                name: name.clone(),
                icon: String::new(),
                href: href.clone(),
            }),
        }
    }
    merged
}

/// Everything the rendering layer needs for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    pub hero: HeroContent,
    pub features: Vec<Feature>,
    pub pricing: Vec<Plan>,
    pub reseller: ResellerContent,
    pub trial: TrialContent,
    pub navigation: Vec<NavLink>,
    pub footer: FooterContent,
}

pub fn compose_page(
    plans: &FetchState<Vec<Plan>>,
    features: &FetchState<Vec<Feature>>,
    settings: &FetchState<AppSettings>,
    defaults: &DefaultContent,
) -> PageContent {
    let settings = settings.data.as_ref();
    PageContent {
        hero: merge_hero(settings, &defaults.hero),
        features: resolve(features, &defaults.features),
        pricing: resolve(plans, &defaults.pricing),
        reseller: defaults.reseller.clone(),
        trial: defaults.trial.clone(),
        navigation: defaults.navigation.clone(),
        footer: merge_footer(settings, &defaults.footer),
    }
}

#[cfg(test)]
#[path = "tests/fallback_tests.rs"]
mod tests;
