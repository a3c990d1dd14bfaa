use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub href: String,
    pub icon_class: String,
    pub label: String,
    pub id: String,
}

impl SocialLink {
    fn new(href: &str, icon_class: &str, label: &str, id: &str) -> Self {
        Self {
            href: href.into(),
            icon_class: icon_class.into(),
            label: label.into(),
            id: id.into(),
        }
    }
}

/// Header data for the portfolio owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileData {
    pub name: String,
    pub image: String,
    pub title: String,
    pub social_links: Vec<SocialLink>,
}

impl ProfileData {
    #[must_use]
    pub fn default_profile() -> Self {
        Self {
            name: "Aung Myo Kyaw".into(),
            image: "https://avatars.githubusercontent.com/u/9404824?v=4".into(),
            title: "Tech Lead | Curious Programmer | Lifelong Learner".into(),
            social_links: vec![
                SocialLink::new(
                    "https://www.linkedin.com/in/aungmyokyaw/",
                    "fab fa-linkedin",
                    "LinkedIn Profile",
                    "linkedin",
                ),
                SocialLink::new(
                    "https://github.com/AungMyoKyaw",
                    "fab fa-github",
                    "GitHub Profile",
                    "github",
                ),
                SocialLink::new(
                    "https://www.coursera.org/learner/aungmyokyaw",
                    "fas fa-graduation-cap",
                    "Coursera Profile",
                    "coursera",
                ),
            ],
        }
    }

    #[must_use]
    pub fn avatar_fallback(&self) -> String {
        avatar_fallback_url(&self.name)
    }
}

/// Generated avatar used when the profile image fails to load.
#[must_use]
pub fn avatar_fallback_url(name: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(name.as_bytes()).collect();
    // ui-avatars expects `%20`, not `+`.
    let encoded = encoded.replace('+', "%20");
    format!("https://ui-avatars.com/api/?name={encoded}&size=160&background=random")
}
