/// Kind of sighting attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Ticket inspectors.
    Inspector,
    Busker,
    Incident,
    /// Display fallback for keys outside the enumeration.
    Other,
}

impl Category {
    /// Categories a user picks from when reporting.
    pub const CHOICES: [Category; 3] = [
        Category::Inspector,
        Category::Busker,
        Category::Incident,
    ];

    /// Stored when a report is submitted without a category.
    pub const DEFAULT_KEY: &'static str = "controleur";

    pub const fn key(&self) -> &'static str {
        match self {
            Category::Inspector => "controleur",
            Category::Busker => "musicien",
            Category::Incident => "incident",
            Category::Other => "autre",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Category::Inspector => "Contrôleurs",
            Category::Busker => "Musicien",
            Category::Incident => "Incident",
            Category::Other => "Signalement",
        }
    }

    /// Marker color used on the map.
    pub const fn color(&self) -> &'static str {
        match self {
            Category::Inspector => "red",
            Category::Busker => "violet",
            Category::Incident => "orange",
            Category::Other => "grey",
        }
    }

    /// Never fails, unknown keys map to [`Category::Other`].
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        [
            Category::Inspector,
            Category::Busker,
            Category::Incident,
            Category::Other,
        ]
        .into_iter()
        .find(|category| category.key().eq_ignore_ascii_case(key))
        .unwrap_or(Category::Other)
    }
}

#[test]
fn known_keys_round_trip() {
    for category in Category::CHOICES {
        assert_eq!(Category::from_key(category.key()), category);
    }
}

#[test]
fn unknown_key_falls_back_to_other() {
    assert_eq!(Category::from_key("pickpocket"), Category::Other);
    assert_eq!(Category::from_key(""), Category::Other);
}

#[test]
fn default_key_is_a_choice() {
    assert_eq!(Category::from_key(Category::DEFAULT_KEY), Category::Inspector);
}
