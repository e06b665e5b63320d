use shared::domain::{ContactInfo, GradingStyle, HeroPage, Preset, Review, Section};

const HERO_IMAGES: [&str; 3] = [
    "/assets/hero1.png",
    "/assets/hero2.png",
    "/assets/hero3.png",
];

pub fn hero_images(page: HeroPage) -> Vec<String> {
    match page {
        HeroPage::Home | HeroPage::Presets => HERO_IMAGES.iter().map(|s| s.to_string()).collect(),
    }
}

fn preset(name: &str, price: &str, description: &str, image: &str) -> Preset {
    Preset {
        name: name.into(),
        price: price.into(),
        description: description.into(),
        image: image.into(),
        id: None,
    }
}

fn section(title: &str, description: &str, presets: Vec<Preset>) -> Section {
    Section {
        title: title.into(),
        description: description.into(),
        presets,
    }
}

pub(crate) fn builtin_sections() -> Vec<Section> {
    vec![
        section(
            "Cinematic",
            "Hollywood-inspired looks with deep contrast and desaturated shadows.",
            vec![
                preset("Blockbuster", "$19.00", "Punchy contrast with crushed blacks.", "/assets/presets/blockbuster.jpg"),
                preset("Anamorphic Night", "$24.00", "Cool night tones with glowing highlights.", "/assets/presets/anamorphic-night.jpg"),
                preset("Letterbox Drama", "$15.00", "Moody midtones built for widescreen stories.", "/assets/presets/letterbox-drama.jpg"),
                preset("Arthouse", "$12.00", "Muted palette with soft, lifted blacks.", "/assets/presets/arthouse.jpg"),
            ],
        ),
        section(
            "Teal & Orange",
            "Warm skin tones against cool shadows for eye-catching contrast.",
            vec![
                preset("Coastline", "$14.00", "Sea-blue shadows and sunlit skin.", "/assets/presets/coastline.jpg"),
                preset("Action Grade", "$18.00", "High contrast complementary split.", "/assets/presets/action-grade.jpg"),
                preset("Vlog Pop", "$9.99", "Bright, saturated travel look.", "/assets/presets/vlog-pop.jpg"),
            ],
        ),
        section(
            "Vintage / Retro",
            "Faded blacks and grain that mimic 70s and 80s film stock.",
            vec![
                preset("Polaroid 79", "$11.00", "Creamy highlights with a warm cast.", "/assets/presets/polaroid-79.jpg"),
                preset("Sepia Dream", "$8.50", "Soft sepia wash with light leaks.", "/assets/presets/sepia-dream.jpg"),
                preset("Super 8", "$13.00", "Grainy home-movie nostalgia.", "/assets/presets/super-8.jpg"),
            ],
        ),
        section(
            "Dark & Moody",
            "Desaturated colour, deep blacks and cool shadows.",
            vec![
                preset("Nocturne", "$16.00", "Inky shadows for low-light portraits.", "/assets/presets/nocturne.jpg"),
                preset("Overcast", "$10.00", "Flat, brooding skies and muted greens.", "/assets/presets/overcast.jpg"),
                preset("Ember", "$17.50", "Dark frame with warm highlight accents.", "/assets/presets/ember.jpg"),
            ],
        ),
        section(
            "Film Look / Analog",
            "Emulations of classic Kodak and Fuji stocks.",
            vec![
                preset("Portra Glow", "$20.00", "Gentle skin tones and pastel highlights.", "/assets/presets/portra-glow.jpg"),
                preset("Velvia Punch", "$20.00", "Saturated landscapes with rich greens.", "/assets/presets/velvia-punch.jpg"),
                preset("Tri-X Mono", "$12.00", "Contrasty black and white with grain.", "/assets/presets/tri-x-mono.jpg"),
            ],
        ),
    ]
}

fn style(title: &str, icon: &str, image: &str, description: &str, ideal_for: &str) -> GradingStyle {
    GradingStyle {
        title: title.into(),
        icon: icon.into(),
        image: image.into(),
        description: description.into(),
        ideal_for: ideal_for.into(),
    }
}

pub fn grading_styles() -> Vec<GradingStyle> {
    vec![
        style(
            "Cinematic",
            "🎞️",
            "/assets/gd6.jpg",
            "Inspired by Hollywood films. Deep contrast, desaturated shadows, often with letterbox bars.",
            "short films, music videos, storytelling content",
        ),
        style(
            "Teal & Orange",
            "🌊",
            "/assets/gd9.jpg",
            "Warm skin tones with cool shadows. High contrast and eye-catching.",
            "travel vlogs, action films, YouTube content",
        ),
        style(
            "Vintage / Retro",
            "📽️",
            "/assets/gd7.jpg",
            "Faded blacks, lower contrast and grain that mimic 70s and 80s film stock.",
            "lifestyle shoots, nostalgic videos, fashion",
        ),
        style(
            "Dark & Moody",
            "🌫️",
            "/assets/gd8.jpg",
            "Desaturated colour, deep blacks and cool shadows that emphasise emotion.",
            "portrait photography, fine art, music videos",
        ),
        style(
            "Film Look / Analog",
            "🎥",
            "/assets/gd1.jpg",
            "Emulates analog film with slight grain, rich colours and balanced highlights.",
            "cinema, weddings, documentaries",
        ),
    ]
}

pub fn contact_info() -> ContactInfo {
    ContactInfo {
        email: "maniora.official@gmail.com".into(),
        phone: "+91 9640161711".into(),
        location: "Hyderabad, Telangana".into(),
    }
}

/// Reviews every preset page starts with.
pub fn sample_reviews() -> Vec<Review> {
    vec![
        Review {
            name: "John Doe".into(),
            date: "March 15, 2024".into(),
            rating: 5,
            content: "Excellent quality and a perfect fit for my footage. Highly recommended!".into(),
        },
        Review {
            name: "Jane Smith".into(),
            date: "March 10, 2024".into(),
            rating: 4,
            content: "Great preset. The only reason for 4 stars is that the colours differ slightly from the sample.".into(),
        },
        Review {
            name: "Mike Johnson".into(),
            date: "March 5, 2024".into(),
            rating: 5,
            content: "Absolutely love this look! It exceeded my expectations.".into(),
        },
    ]
}
