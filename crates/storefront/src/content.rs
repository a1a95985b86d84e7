//! Static marketing copy for the home page.

/// One headline figure in the about section.
#[derive(Debug, Clone, Copy)]
pub struct Stat {
    pub figure: &'static str,
    pub caption: &'static str,
}

/// Hero banner.
#[derive(Debug, Clone, Copy)]
pub struct Hero {
    pub eyebrow: &'static str,
    pub headline: &'static str,
    pub tagline: &'static str,
}

/// About section.
#[derive(Debug, Clone, Copy)]
pub struct About {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
    pub stats: &'static [Stat],
}

/// Newsletter call to action.
#[derive(Debug, Clone, Copy)]
pub struct Newsletter {
    pub eyebrow: &'static str,
    pub heading: &'static str,
    pub blurb: &'static str,
    pub fine_print: &'static str,
}

pub const HERO: Hero = Hero {
    eyebrow: "New Collection",
    headline: "Discover Your Natural Beauty Glow",
    tagline: "Luxurious skincare products made with premium ingredients to help you \
              achieve your best skin ever.",
};

pub const ABOUT: About = About {
    heading: "Clean Beauty for a Radiant You",
    paragraphs: &[
        "At Ila Beauty, we believe skincare should be effective, sustainable, and a \
         moment of self-care in your day. Our products are formulated with clean, \
         premium ingredients that deliver real results.",
        "Founded in 2020, our mission is to create skincare that works in harmony with \
         your skin's natural processes, not against them. Each product is \
         dermatologist-tested and made without harmful chemicals.",
    ],
    stats: &[
        Stat {
            figure: "100%",
            caption: "Cruelty-Free Products",
        },
        Stat {
            figure: "50+",
            caption: "Natural Ingredients",
        },
        Stat {
            figure: "15K+",
            caption: "Happy Customers",
        },
    ],
};

pub const NEWSLETTER: Newsletter = Newsletter {
    eyebrow: "Join our community",
    heading: "Subscribe to Our Newsletter",
    blurb: "Subscribe to receive updates on new product launches, seasonal promotions, \
            and skincare tips from our experts.",
    fine_print: "By subscribing, you agree to our Privacy Policy and consent to receive \
                 updates from our company.",
};
