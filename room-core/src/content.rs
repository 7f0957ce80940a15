//! Static modal content: one sheet per hotspot plus the first-visit guide.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub details: &'static str,
}

static OBJECTS: &[ObjectInfo] = &[
    ObjectInfo {
        id: "sofa",
        name: "Comfortable Sofa",
        icon: "🛋️",
        description: "A luxurious and comfortable sofa perfect for relaxation and entertainment. Designed with premium materials for ultimate comfort.",
        features: &[
            "Premium fabric upholstery",
            "Ergonomic design for maximum comfort",
            "Generous seating space for 3-4 people",
            "Built-in storage compartments",
            "Easy-to-clean materials",
        ],
        details: "Perfect centerpiece for your living room, offering both style and functionality.",
    },
    ObjectInfo {
        id: "fireplace",
        name: "Cozy Fireplace",
        icon: "🔥",
        description: "A modern electric fireplace that creates a warm and inviting atmosphere. Perfect for creating a cozy ambiance.",
        features: &[
            "Realistic flame effects",
            "Adjustable heat settings",
            "Remote control operation",
            "Energy-efficient LED technology",
            "Safe for children and pets",
        ],
        details: "Creates the perfect atmosphere for romantic evenings or family gatherings.",
    },
    ObjectInfo {
        id: "tv",
        name: "Smart TV Entertainment",
        icon: "📺",
        description: "A state-of-the-art smart TV with stunning picture quality and smart features for endless entertainment.",
        features: &[
            "4K Ultra HD resolution",
            "Built-in streaming apps",
            "Voice control capabilities",
            "Multiple HDMI ports",
            "Wireless screen mirroring",
        ],
        details: "Your gateway to endless entertainment with crystal-clear picture quality.",
    },
    ObjectInfo {
        id: "bookshelf",
        name: "Elegant Bookshelf",
        icon: "📚",
        description: "A sophisticated bookshelf that combines storage with style. Perfect for displaying your favorite books and decorative items.",
        features: &[
            "Adjustable shelf heights",
            "Solid wood construction",
            "Hidden cable management",
            "Built-in lighting options",
            "Modular design for easy assembly",
        ],
        details: "Organize your collection while adding elegance to your space.",
    },
];

pub fn object_info(id: &str) -> Option<&'static ObjectInfo> {
    OBJECTS.iter().find(|o| o.id == id)
}

/// One page of the instructions guide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstructionStep {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static str,
}

pub static INSTRUCTIONS: &[InstructionStep] = &[
    InstructionStep {
        icon: "🏠",
        title: "Welcome to Your Interactive Room!",
        description: "Experience your perfect space through an immersive video journey. Navigate seamlessly through every corner.",
        details: "Scroll to explore the entire room",
    },
    InstructionStep {
        icon: "🗺️",
        title: "Smart Navigation",
        description: "Use the navigation map to instantly jump to specific areas: sofa, fireplace, TV, and bookshelf.",
        details: "Click the menu icon (☰) in the top-right corner",
    },
    InstructionStep {
        icon: "✨",
        title: "Interactive Highlights",
        description: "Watch for automatic highlights that appear when you reach specific areas in the room.",
        details: "Objects will glow when you're in their viewing range",
    },
    InstructionStep {
        icon: "🖱️",
        title: "Dynamic Camera Effects",
        description: "Move your mouse over the video to experience realistic camera movements and depth.",
        details: "Hover anywhere on the video for parallax effects",
    },
    InstructionStep {
        icon: "✏️",
        title: "Customize Highlights",
        description: "Want to adjust highlight positions? Use edit mode to drag and reposition them exactly where you want.",
        details: "Click the edit icon (✏️) next to the help button",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_every_hotspot_has_content() {
        for p in Catalog::compiled().points() {
            let info = object_info(&p.id).unwrap_or_else(|| panic!("no content for {}", p.id));
            assert_eq!(info.icon, p.icon);
            assert!(!info.features.is_empty());
        }
        assert!(object_info("lamp").is_none());
    }

    #[test]
    fn test_guide_has_five_steps() {
        assert_eq!(INSTRUCTIONS.len(), 5);
        assert!(INSTRUCTIONS.iter().all(|s| !s.title.is_empty() && !s.details.is_empty()));
    }
}
