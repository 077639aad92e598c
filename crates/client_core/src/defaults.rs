//! Built-in storefront content, shown while the backend is loading or unreachable.

use std::{collections::BTreeMap, sync::OnceLock};

use serde::Serialize;
use shared::domain::{Feature, FeatureId, Plan, PlanId};

pub const DEFAULT_CONTENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub background_image: String,
    pub cta_text: String,
    pub features: Vec<String>,
    pub stats: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Benefit {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResellerContent {
    pub title: String,
    pub subtitle: String,
    pub benefits: Vec<Benefit>,
    pub cta_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialContent {
    pub title: String,
    pub subtitle: String,
    pub features: Vec<String>,
    pub cta_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterContent {
    pub company: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub quick_links: Vec<NavLink>,
}

/// Immutable snapshot of every section the page can render without the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultContent {
    pub version: u32,
    pub hero: HeroContent,
    pub features: Vec<Feature>,
    pub pricing: Vec<Plan>,
    pub reseller: ResellerContent,
    pub trial: TrialContent,
    pub navigation: Vec<NavLink>,
    pub footer: FooterContent,
}

impl DefaultContent {
    pub fn builtin() -> &'static DefaultContent {
        static BUILTIN: OnceLock<DefaultContent> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin)
    }
}

const PLAN_FEATURES: [&str; 11] = [
    "25,000+ Live Channels",
    "100,000+ VOD Titles",
    "4K Ultra HD Quality",
    "Multi-Device Access",
    "24/7 Customer Support",
    "Instant Activation",
    "EPG Included",
    "99.9% Uptime Guarantee",
    "Priority Support",
    "Exclusive Content",
    "Premium Sports Package",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn feature(id: &str, order: i32, title: &str, description: &str, icon: &str, color: &str) -> Feature {
    Feature {
        id: FeatureId::from(id),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        color: color.into(),
        order,
        active: true,
        created_at: None,
        updated_at: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn plan(
    id: &str,
    duration: &str,
    price: f64,
    original_price: f64,
    popular: bool,
    feature_count: usize,
    color: &str,
    button_text: &str,
) -> Plan {
    Plan {
        id: PlanId::from(id),
        duration: duration.into(),
        price,
        original_price,
        popular,
        features: strings(&PLAN_FEATURES[..feature_count]),
        color: color.into(),
        button_text: button_text.into(),
        created_at: None,
        updated_at: None,
    }
}

fn nav(name: &str, href: &str) -> NavLink {
    NavLink {
        name: name.into(),
        href: href.into(),
    }
}

fn build_builtin() -> DefaultContent {
    DefaultContent {
        version: DEFAULT_CONTENT_VERSION,
        hero: HeroContent {
            title: "Premium Streaming Unleashed".into(),
            subtitle: "Experience unlimited entertainment with 25,000+ live channels and 100,000+ VOD titles in stunning 4K quality".into(),
            background_image: "https://images.unsplash.com/photo-1593280359364-5242f1958068".into(),
            cta_text: "Start Free Trial".into(),
            features: strings(&["Instant Activation", "24/7 Support", "99.9% Uptime"]),
            stats: BTreeMap::new(),
        },
        features: vec![
            feature("1", 1, "25,000+ Live Channels", "Access to premium live TV channels from around the world in HD and 4K quality", "📺", "from-blue-500 to-purple-600"),
            feature("2", 2, "100,000+ VOD Titles", "Massive library of movies, TV shows, documentaries, and exclusive content", "🎬", "from-purple-500 to-pink-600"),
            feature("3", 3, "4K Ultra HD Streaming", "Crystal clear streaming with 4K resolution for the ultimate viewing experience", "✨", "from-pink-500 to-orange-600"),
            feature("4", 4, "Multi-Device Support", "Watch on any device - TV, mobile, tablet, laptop, smart TV, and streaming devices", "📱", "from-orange-500 to-red-600"),
            feature("5", 5, "Global Content", "International channels and content in multiple languages from every continent", "🌍", "from-green-500 to-blue-600"),
            feature("6", 6, "24/7 Premium Support", "Round-the-clock customer support to ensure seamless streaming experience", "🛠️", "from-indigo-500 to-purple-600"),
        ],
        pricing: vec![
            plan("1", "1 Month", 12.0, 15.0, false, 8, "from-blue-500 to-blue-600", "Get Started"),
            plan("2", "3 Months", 25.0, 45.0, true, 9, "from-purple-500 to-pink-600", "Most Popular"),
            plan("3", "6 Months", 45.0, 90.0, false, 10, "from-green-500 to-teal-600", "Best Value"),
            plan("4", "12 Months", 79.0, 180.0, false, 11, "from-orange-500 to-red-600", "Ultimate Deal"),
        ],
        reseller: ResellerContent {
            title: "Join Our Reseller Program".into(),
            subtitle: "Become a partner and earn up to 60% commission on every sale".into(),
            benefits: vec![
                Benefit {
                    title: "High Commission Rates".into(),
                    description: "Earn up to 60% commission on every successful subscription sale".into(),
                    icon: "💰".into(),
                },
                Benefit {
                    title: "Marketing Support".into(),
                    description: "Access to marketing materials, banners, and promotional content".into(),
                    icon: "📈".into(),
                },
                Benefit {
                    title: "Dedicated Dashboard".into(),
                    description: "Track your sales, earnings, and customer analytics in real-time".into(),
                    icon: "📊".into(),
                },
                Benefit {
                    title: "24/7 Support".into(),
                    description: "Dedicated support team to help you succeed as a reseller".into(),
                    icon: "🤝".into(),
                },
            ],
            cta_text: "Apply Now".into(),
        },
        trial: TrialContent {
            title: "Try Before You Buy".into(),
            subtitle: "Experience our premium service with a 48-hour free trial".into(),
            features: strings(&[
                "Full access to all channels",
                "No credit card required",
                "Instant activation",
                "Cancel anytime",
            ]),
            cta_text: "Start Free Trial".into(),
        },
        navigation: vec![
            nav("Home", "#home"),
            nav("Features", "#features"),
            nav("Pricing", "#pricing"),
            nav("Reseller", "#reseller"),
            nav("Free Trial", "#trial"),
        ],
        footer: FooterContent {
            company: "StreamMax Pro".into(),
            description: "Premium streaming service with unlimited entertainment options".into(),
            contact_email: None,
            support_email: None,
            social_links: vec![
                SocialLink { name: "Twitter".into(), icon: "🐦".into(), href: "#".into() },
                SocialLink { name: "Facebook".into(), icon: "📘".into(), href: "#".into() },
                SocialLink { name: "Instagram".into(), icon: "📷".into(), href: "#".into() },
                SocialLink { name: "YouTube".into(), icon: "📺".into(), href: "#".into() },
            ],
            quick_links: vec![
                nav("Terms of Service", "#"),
                nav("Privacy Policy", "#"),
                nav("Support", "#"),
                nav("Contact", "#"),
            ],
        },
    }
}
