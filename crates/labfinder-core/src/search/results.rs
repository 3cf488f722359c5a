//! Client-side sorting and distance filtering of a results list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::model::Lab;
use crate::error::LabFinderError;

/// Ordering applied to the visible labs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
pub enum SortOption {
    /// Nearest first
    #[default]
    #[strum(serialize = "distance")]
    #[serde(rename = "distance")]
    Distance,
    /// Cheapest first
    #[strum(serialize = "price-asc")]
    #[serde(rename = "price-asc")]
    PriceAsc,
    /// Most expensive first
    #[strum(serialize = "price-desc")]
    #[serde(rename = "price-desc")]
    PriceDesc,
    /// Best rated first
    #[strum(serialize = "rating")]
    #[serde(rename = "rating")]
    Rating,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Distance => "Distance (Nearest)",
            Self::PriceAsc => "Price (Low to High)",
            Self::PriceDesc => "Price (High to Low)",
            Self::Rating => "Rating (Highest)",
        }
    }

    fn sort(&self, labs: &mut [Lab]) {
        match self {
            Self::Distance => labs.sort_by(|a, b| a.distance.total_cmp(&b.distance)),
            Self::PriceAsc => labs.sort_by(|a, b| a.test_price.total_cmp(&b.test_price)),
            Self::PriceDesc => labs.sort_by(|a, b| b.test_price.total_cmp(&a.test_price)),
            Self::Rating => labs.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

/// Maximum distance a lab may be from the searched location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceFilter {
    #[default]
    All,
    /// Labs at most this many kilometres away (inclusive)
    WithinKm(u32),
}

impl DistanceFilter {
    /// The choices offered on the results page.
    pub const CHOICES: [DistanceFilter; 4] = [
        Self::All,
        Self::WithinKm(5),
        Self::WithinKm(10),
        Self::WithinKm(20),
    ];

    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::WithinKm(km) => format!("Within {} km", km),
        }
    }

    pub fn admits(&self, lab: &Lab) -> bool {
        match self {
            Self::All => true,
            Self::WithinKm(km) => lab.distance <= f64::from(*km),
        }
    }
}

impl FromStr for DistanceFilter {
    type Err = LabFinderError;

    /// Accepts `all` or a whole number of kilometres (`5`, `10`, `20`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.trim_end_matches("km")
            .trim()
            .parse::<u32>()
            .map(Self::WithinKm)
            .map_err(|_| LabFinderError::not_found("distance filter", s))
    }
}

/// The loaded labs plus the sorted, filtered view shown to the user.
#[derive(Debug, Clone, Default)]
pub struct LabResults {
    labs: Vec<Lab>,
    visible: Vec<Lab>,
    sort: SortOption,
    filter: DistanceFilter,
}

impl LabResults {
    /// Wraps a freshly loaded list with the default sort and no filter.
    pub fn new(labs: Vec<Lab>) -> Self {
        let mut results = Self {
            labs,
            ..Self::default()
        };
        results.refresh();
        results
    }

    pub fn sort_by(&mut self, sort: SortOption) {
        self.sort = sort;
        self.sort.sort(&mut self.visible);
    }

    /// Recomputes the visible list from all labs and re-applies the current
    /// sort.
    pub fn filter_by(&mut self, filter: DistanceFilter) {
        self.filter = filter;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = self
            .labs
            .iter()
            .filter(|lab| self.filter.admits(lab))
            .cloned()
            .collect();
        self.sort.sort(&mut self.visible);
    }

    pub fn visible(&self) -> &[Lab] {
        &self.visible
    }

    pub fn all(&self) -> &[Lab] {
        &self.labs
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn filter(&self) -> DistanceFilter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn lab(id: &str, distance: f64, rating: f64, price: f64) -> Lab {
        Lab {
            id: id.to_string(),
            name: format!("Lab {}", id),
            address: "1 Main St".to_string(),
            distance,
            rating,
            review_count: 10,
            test_price: price,
            opening_hours: "Mon-Fri 8am-5pm".to_string(),
            phone: "(555) 000-0000".to_string(),
            logo_url: None,
            accreditations: vec![],
            services: vec![],
        }
    }

    fn ids(results: &LabResults) -> Vec<&str> {
        results.visible().iter().map(|l| l.id.as_str()).collect()
    }

    fn sample() -> LabResults {
        LabResults::new(vec![
            lab("a", 12.0, 4.1, 40.0),
            lab("b", 3.5, 4.8, 55.0),
            lab("c", 5.0, 3.9, 25.0),
            lab("d", 21.0, 4.5, 30.0),
        ])
    }

    #[test]
    fn test_default_sort_is_distance() {
        let results = sample();
        assert_eq!(results.sort(), SortOption::Distance);
        assert_eq!(ids(&results), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_sort_options() {
        let mut results = sample();
        results.sort_by(SortOption::PriceAsc);
        assert_eq!(ids(&results), vec!["c", "d", "a", "b"]);
        results.sort_by(SortOption::PriceDesc);
        assert_eq!(ids(&results), vec!["b", "a", "d", "c"]);
        results.sort_by(SortOption::Rating);
        assert_eq!(ids(&results), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_filter_is_inclusive_and_keeps_sort() {
        let mut results = sample();
        results.sort_by(SortOption::PriceAsc);

        results.filter_by(DistanceFilter::WithinKm(5));
        assert_eq!(ids(&results), vec!["c", "b"]);

        results.filter_by(DistanceFilter::WithinKm(20));
        assert_eq!(ids(&results), vec!["c", "a", "b"]);

        results.filter_by(DistanceFilter::All);
        assert_eq!(results.visible().len(), 4);
        assert_eq!(results.all().len(), 4);
    }

    #[test]
    fn test_filter_can_empty_the_list() {
        let mut results = sample();
        results.filter_by(DistanceFilter::WithinKm(1));
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("price-asc".parse::<SortOption>().unwrap(), SortOption::PriceAsc);
        assert_eq!(SortOption::Rating.to_string(), "rating");
        assert_eq!(SortOption::iter().count(), 4);
        assert!("cheapest".parse::<SortOption>().is_err());

        assert_eq!("all".parse::<DistanceFilter>().unwrap(), DistanceFilter::All);
        assert_eq!(
            "10".parse::<DistanceFilter>().unwrap(),
            DistanceFilter::WithinKm(10)
        );
        assert_eq!(
            "5km".parse::<DistanceFilter>().unwrap(),
            DistanceFilter::WithinKm(5)
        );
        assert!("near".parse::<DistanceFilter>().is_err());
        assert_eq!(DistanceFilter::WithinKm(5).label(), "Within 5 km");
    }
}
