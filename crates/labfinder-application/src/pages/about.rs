//! Static marketing content: the about page, trust badges and testimonials.

/// A headed block of prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub body: &'static str,
}

/// Headline figure shown in the trust badge strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustStat {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

pub const MISSION: Section = Section {
    heading: "Our Mission",
    body: "Medical Lab Finder was created with a simple mission: to make healthcare more \
           accessible and affordable by connecting patients with the right diagnostic \
           laboratories. We believe that everyone deserves access to quality healthcare \
           services without the burden of excessive costs or inconvenience.",
};

pub const WHAT_WE_DO: Section = Section {
    heading: "What We Do",
    body: "Our platform helps patients find accredited medical laboratories near their \
           location that offer the specific diagnostic tests they need. We provide \
           transparent pricing information, verified reviews, and easy booking options to \
           simplify the process of getting medical tests done.",
};

pub const VALUES: [Section; 4] = [
    Section {
        heading: "Transparency",
        body: "We believe in complete transparency in healthcare pricing and services.",
    },
    Section {
        heading: "Accessibility",
        body: "Making healthcare services accessible to everyone, everywhere.",
    },
    Section {
        heading: "Quality",
        body: "We only partner with accredited laboratories that meet our quality standards.",
    },
    Section {
        heading: "Privacy",
        body: "We take your privacy seriously and protect your personal health information.",
    },
];

pub const TRUST_STATS: [TrustStat; 5] = [
    TrustStat {
        value: "500+",
        label: "Accredited Labs",
    },
    TrustStat {
        value: "50,000+",
        label: "Tests Available",
    },
    TrustStat {
        value: "10,000+",
        label: "Happy Patients",
    },
    TrustStat {
        value: "4.8/5",
        label: "Average Rating",
    },
    TrustStat {
        value: "30%",
        label: "Average Savings",
    },
];

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        quote: "This platform saved me so much time and money. I found a lab that was half \
                the price of what my doctor's office quoted me!",
        author: "Sarah Johnson",
        role: "Patient",
    },
    Testimonial {
        quote: "As a doctor, I recommend this service to all my patients. It helps them find \
                quality labs with transparent pricing.",
        author: "Dr. Michael Chen",
        role: "Cardiologist",
    },
    Testimonial {
        quote: "I was able to book my annual blood work in minutes and found a lab just 2 \
                miles from my home. Incredibly convenient!",
        author: "Robert Garcia",
        role: "Patient",
    },
];

/// The `/about` page.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutView {
    pub title: &'static str,
    pub mission: Section,
    pub what_we_do: Section,
    pub values: &'static [Section],
    pub testimonials: &'static [Testimonial],
}

impl AboutView {
    pub fn new() -> Self {
        Self {
            title: "About Medical Lab Finder",
            mission: MISSION,
            what_we_do: WHAT_WE_DO,
            values: &VALUES,
            testimonials: &TESTIMONIALS,
        }
    }
}

impl Default for AboutView {
    fn default() -> Self {
        Self::new()
    }
}
