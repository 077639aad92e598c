use super::*;

use shared::domain::HeroData;

fn every_state_shape<T: Clone>(data: Option<T>) -> Vec<FetchState<T>> {
    [(true, None), (false, None), (false, Some("boom".to_string()))]
        .into_iter()
        .map(|(loading, error)| FetchState {
            data: data.clone(),
            loading,
            error,
        })
        .collect()
}

#[test]
fn present_data_wins_in_every_state() {
    for state in every_state_shape(Some(vec![1, 2])) {
        assert_eq!(resolve(&state, &vec![9]), vec![1, 2], "{state:?}");
    }
}

#[test]
fn absent_data_falls_back_in_every_state() {
    for state in every_state_shape::<Vec<u8>>(None) {
        assert_eq!(resolve(&state, &vec![9]), vec![9], "{state:?}");
    }
}

#[test]
fn empty_remote_list_is_not_replaced() {
    let defaults = DefaultContent::builtin();
    let page = compose_page(
        &FetchState::ready(Vec::new()),
        &FetchState::pending(),
        &FetchState::failed("offline"),
        defaults,
    );
    assert!(page.pricing.is_empty());
    assert_eq!(page.features, defaults.features);
    assert_eq!(page.hero, defaults.hero);
    assert_eq!(page.footer, defaults.footer);
}

#[test]
fn stale_data_is_used_after_a_failed_reload() {
    let defaults = DefaultContent::builtin();
    let mut stale = defaults.pricing.clone();
    stale.truncate(1);
    let plans = FetchState {
        data: Some(stale.clone()),
        loading: false,
        error: Some("request failed with status 500".into()),
    };
    let page = compose_page(&plans, &FetchState::pending(), &FetchState::pending(), defaults);
    assert_eq!(page.pricing, stale);
}

#[test]
fn hero_merges_field_by_field() {
    let defaults = DefaultContent::builtin();
    let settings = AppSettings {
        hero_data: Some(HeroData {
            title: Some("Live Sports Tonight".into()),
            stats: Some(BTreeMap::from([("channels".to_string(), "25K+".to_string())])),
            ..HeroData::default()
        }),
        ..AppSettings::default()
    };

    let hero = merge_hero(Some(&settings), &defaults.hero);
    assert_eq!(hero.title, "Live Sports Tonight");
    assert_eq!(hero.subtitle, defaults.hero.subtitle);
    assert_eq!(hero.cta_text, defaults.hero.cta_text);
    assert_eq!(hero.features, defaults.hero.features);
    assert_eq!(hero.stats.get("channels").map(String::as_str), Some("25K+"));
}

#[test]
fn settings_without_hero_keep_default_hero() {
    let defaults = DefaultContent::builtin();
    let settings = AppSettings {
        company_name: Some("Acme TV".into()),
        ..AppSettings::default()
    };
    assert_eq!(merge_hero(Some(&settings), &defaults.hero), defaults.hero);
    assert_eq!(merge_hero(None, &defaults.hero), defaults.hero);
}

#[test]
fn footer_merges_company_and_links() {
    let defaults = DefaultContent::builtin();
    let settings = AppSettings {
        company_name: Some("Acme TV".into()),
        support_email: Some("support@acme.tv".into()),
        social_links: Some(BTreeMap::from([
            ("twitter".to_string(), "https://twitter.com/acme".to_string()),
            ("Mastodon".to_string(), "https://social.example/@acme".to_string()),
        ])),
        ..AppSettings::default()
    };

    let footer = merge_footer(Some(&settings), &defaults.footer);
    assert_eq!(footer.company, "Acme TV");
    assert_eq!(footer.description, defaults.footer.description);
    assert_eq!(footer.contact_email, None);
    assert_eq!(footer.support_email.as_deref(), Some("support@acme.tv"));
    assert_eq!(footer.quick_links, defaults.footer.quick_links);

    let twitter = &footer.social_links[0];
    assert_eq!(twitter.name, "Twitter");
    assert_eq!(twitter.icon, defaults.footer.social_links[0].icon);
    assert_eq!(twitter.href, "https://twitter.com/acme");
    assert_eq!(footer.social_links[1].href, "#");

    let appended = footer.social_links.last().expect("appended link");
    assert_eq!(appended.name, "Mastodon");
    assert_eq!(appended.icon, "");
    assert_eq!(footer.social_links.len(), 5);
}

#[test]
fn composition_is_deterministic() {
    let defaults = DefaultContent::builtin();
    let settings = FetchState::ready(AppSettings {
        company_description: Some("Streaming for everyone".into()),
        ..AppSettings::default()
    });
    let plans = FetchState::pending();
    let features = FetchState::ready(defaults.features[..2].to_vec());

    let first = compose_page(&plans, &features, &settings, defaults);
    let second = compose_page(&plans, &features, &settings, defaults);
    assert_eq!(first, second);
    assert_eq!(first.features.len(), 2);
    assert_eq!(first.pricing, defaults.pricing);
    assert_eq!(first.footer.description, "Streaming for everyone");
    assert_eq!(first.navigation, defaults.navigation);
}
