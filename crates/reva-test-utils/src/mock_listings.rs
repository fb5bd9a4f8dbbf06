// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture-backed listing data service for tests.

use async_trait::async_trait;
use reva_core::{
    AgentInquiry, InquiryConfirmation, Listing, ListingDataService, ListingSummary, MarketStat,
    NeighborhoodInfo, PriceTrendPoint, RevaError, SearchCriteria, TourConfirmation, TourRequest,
};
use uuid::Uuid;

/// In-memory data service over a fixed set of listings.
pub struct MockListingService {
    listings: Vec<Listing>,
}

fn listing(
    id: &str,
    address: &str,
    city: &str,
    neighborhood: &str,
    price: u64,
    bedrooms: u32,
    bathrooms: f32,
    property_type: &str,
    square_feet: u32,
    description: &str,
    features: &[&str],
) -> Listing {
    Listing {
        id: id.into(),
        address: address.into(),
        city: city.into(),
        neighborhood: neighborhood.into(),
        price,
        bedrooms,
        bathrooms,
        property_type: property_type.into(),
        square_feet,
        year_built: 1998,
        annual_taxes: price / 100,
        hoa_fee: if property_type == "condo" {
            Some(450)
        } else {
            None
        },
        school_district: format!("{city} Public Schools"),
        description: description.into(),
        features: features.iter().map(|f| f.to_string()).collect(),
        status: "active".into(),
    }
}

impl MockListingService {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// A small Boston-area inventory used by most tests.
    pub fn with_fixtures() -> Self {
        Self::new(vec![
            listing(
                "MLS12345",
                "123 Beacon Street",
                "Boston",
                "Back Bay",
                850_000,
                2,
                2.0,
                "condo",
                1_150,
                "Sun-filled two bedroom condo with bay windows and a private deck.",
                &["hardwood floors", "deck", "in-unit laundry"],
            ),
            listing(
                "MLS23456",
                "45 Tremont Street",
                "Boston",
                "South End",
                625_000,
                1,
                1.0,
                "condo",
                780,
                "Renovated one bedroom steps from the park, with a shared garden.",
                &["garden", "renovated kitchen"],
            ),
            listing(
                "MLS34567",
                "8 Chestnut Street",
                "Boston",
                "Beacon Hill",
                1_450_000,
                3,
                2.5,
                "townhouse",
                2_100,
                "Classic brick townhouse on a gas-lit street with a roof deck.",
                &["roof deck", "fireplace", "wine cellar"],
            ),
            listing(
                "MLS45678",
                "210 Elm Street",
                "Cambridge",
                "Porter Square",
                990_000,
                3,
                2.0,
                "house",
                1_800,
                "Single family near the red line with a fenced yard and garage.",
                &["garage", "fenced yard"],
            ),
        ])
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    fn matches(listing: &Listing, criteria: &SearchCriteria) -> bool {
        if let Some(city) = &criteria.city
            && !listing.city.eq_ignore_ascii_case(city)
        {
            return false;
        }
        if let Some(neighborhood) = &criteria.neighborhood
            && !listing.neighborhood.eq_ignore_ascii_case(neighborhood)
        {
            return false;
        }
        if let Some(property_type) = &criteria.property_type
            && !listing.property_type.eq_ignore_ascii_case(property_type)
        {
            return false;
        }
        if let Some(min) = criteria.min_price
            && listing.price < min
        {
            return false;
        }
        if let Some(max) = criteria.max_price
            && listing.price > max
        {
            return false;
        }
        if let Some(beds) = criteria.min_bedrooms
            && listing.bedrooms < beds
        {
            return false;
        }
        if let Some(baths) = criteria.min_bathrooms
            && listing.bathrooms < baths
        {
            return false;
        }
        if let Some(keywords) = &criteria.keywords {
            let haystack = format!("{} {}", listing.description, listing.features.join(" "))
                .to_lowercase();
            if !keywords
                .to_lowercase()
                .split_whitespace()
                .any(|word| haystack.contains(word))
            {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ListingDataService for MockListingService {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ListingSummary>, RevaError> {
        Ok(self
            .listings
            .iter()
            .filter(|l| Self::matches(l, criteria))
            .map(Listing::summary)
            .collect())
    }

    async fn listing_details(&self, listing_id: &str) -> Result<Option<Listing>, RevaError> {
        Ok(self.listings.iter().find(|l| l.id == listing_id).cloned())
    }

    async fn market_stats(
        &self,
        stat_type: &str,
        city: Option<&str>,
        property_type: Option<&str>,
    ) -> Result<MarketStat, RevaError> {
        let scoped: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| city.is_none_or(|c| l.city.eq_ignore_ascii_case(c)))
            .filter(|l| property_type.is_none_or(|t| l.property_type.eq_ignore_ascii_case(t)))
            .collect();

        let value = match stat_type {
            "median_price" | "average_price" => {
                if scoped.is_empty() {
                    0.0
                } else {
                    scoped.iter().map(|l| l.price as f64).sum::<f64>() / scoped.len() as f64
                }
            }
            "days_on_market" => 24.0,
            "inventory" => scoped.len() as f64,
            other => {
                return Err(RevaError::DataService(format!(
                    "unknown stat type: {other}"
                )));
            }
        };

        Ok(MarketStat {
            stat_type: stat_type.into(),
            city: city.map(str::to_string),
            property_type: property_type.map(str::to_string),
            value,
            unit: if stat_type == "days_on_market" {
                "days".into()
            } else if stat_type == "inventory" {
                "listings".into()
            } else {
                "usd".into()
            },
            sample_size: scoped.len() as u32,
        })
    }

    async fn neighborhood_info(
        &self,
        neighborhood: &str,
    ) -> Result<Option<NeighborhoodInfo>, RevaError> {
        let scoped: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| l.neighborhood.eq_ignore_ascii_case(neighborhood))
            .collect();
        if scoped.is_empty() {
            return Ok(None);
        }

        let mut prices: Vec<u64> = scoped.iter().map(|l| l.price).collect();
        prices.sort_unstable();
        Ok(Some(NeighborhoodInfo {
            name: scoped[0].neighborhood.clone(),
            city: scoped[0].city.clone(),
            median_price: prices[prices.len() / 2],
            active_listings: scoped.len() as u32,
            school_rating: 8.0,
            walk_score: 90,
        }))
    }

    async fn price_trends(
        &self,
        city: Option<&str>,
        property_type: Option<&str>,
        months: u32,
    ) -> Result<Vec<PriceTrendPoint>, RevaError> {
        let base = self
            .market_stats("median_price", city, property_type)
            .await?
            .value as u64;
        Ok((0..months)
            .map(|i| PriceTrendPoint {
                month: format!("2026-{:02}", (i % 12) + 1),
                median_price: base + u64::from(i) * 2_500,
                sales_count: 40 + i,
            })
            .collect())
    }

    async fn similar_listings(
        &self,
        listing_id: &str,
        count: usize,
    ) -> Result<Vec<ListingSummary>, RevaError> {
        let Some(anchor) = self.listings.iter().find(|l| l.id == listing_id) else {
            return Ok(Vec::new());
        };
        Ok(self
            .listings
            .iter()
            .filter(|l| l.id != anchor.id && l.city == anchor.city)
            .take(count)
            .map(Listing::summary)
            .collect())
    }

    async fn text_search(&self, query: &str) -> Result<Vec<ListingSummary>, RevaError> {
        let needle = query.to_lowercase();
        Ok(self
            .listings
            .iter()
            .filter(|l| {
                l.address.to_lowercase().contains(&needle)
                    || l.description.to_lowercase().contains(&needle)
                    || l.features.iter().any(|f| f.to_lowercase().contains(&needle))
            })
            .map(Listing::summary)
            .collect())
    }

    async fn schedule_tour(&self, request: &TourRequest) -> Result<TourConfirmation, RevaError> {
        if !self.listings.iter().any(|l| l.id == request.listing_id) {
            return Err(RevaError::DataService(format!(
                "no listing with id {}",
                request.listing_id
            )));
        }
        Ok(TourConfirmation {
            confirmation_id: Uuid::new_v4().to_string(),
            listing_id: request.listing_id.clone(),
            scheduled_for: match (&request.date, &request.time) {
                (Some(d), Some(t)) => Some(format!("{d} {t}")),
                (Some(d), None) => Some(d.clone()),
                _ => None,
            },
        })
    }

    async fn contact_agent(
        &self,
        _inquiry: &AgentInquiry,
    ) -> Result<InquiryConfirmation, RevaError> {
        Ok(InquiryConfirmation {
            confirmation_id: Uuid::new_v4().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_filters_by_city_and_price() {
        let data = MockListingService::with_fixtures();
        let results = data
            .search(&SearchCriteria {
                city: Some("Boston".into()),
                max_price: Some(900_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.city == "Boston"));
    }

    #[tokio::test]
    async fn details_round_trip_and_unknown_id() {
        let data = MockListingService::with_fixtures();
        let found = data.listing_details("MLS12345").await.unwrap().unwrap();
        assert_eq!(found.neighborhood, "Back Bay");
        assert!(data.listing_details("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn text_search_matches_descriptions_and_features() {
        let data = MockListingService::with_fixtures();
        let results = data.text_search("garden").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "MLS23456");
    }

    #[tokio::test]
    async fn similar_listings_exclude_the_anchor() {
        let data = MockListingService::with_fixtures();
        let results = data.similar_listings("MLS12345", 5).await.unwrap();
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.id != "MLS12345"));
    }

    #[tokio::test]
    async fn inventory_stat_counts_scoped_listings() {
        let data = MockListingService::with_fixtures();
        let stat = data
            .market_stats("inventory", Some("Boston"), None)
            .await
            .unwrap();
        assert_eq!(stat.value, 3.0);
        assert_eq!(stat.sample_size, 3);
    }
}
