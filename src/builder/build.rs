//! Descriptor → wire payload

use chrono::{DateTime, Utc};
use super::error::BuildError;
use super::filters::build_events_with_properties;
use super::group_by::build_group_by;
use super::window::{resolve_frequency, time_window};
use crate::config::QueryConfig;
use crate::descriptor::{BreakdownType, CountType, PropertyCatalog, QueryDescriptor, QueryType};
use crate::wire::{QueryPayload, WireQuery};

/// Builds backend payloads from composer descriptors
///
/// Everything is validated before a payload is assembled, so a returned
/// payload never carries placeholder fields.
#[derive(Debug, Clone)]
pub struct QueryBuilder<'a> {
    config: &'a QueryConfig,
    catalog: Option<&'a PropertyCatalog>,
    now: Option<DateTime<Utc>>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(config: &'a QueryConfig) -> Self {
        Self {
            config,
            catalog: None,
            now: None,
        }
    }

    /// Validate properties against a project's catalog
    pub fn with_catalog(mut self, catalog: &'a PropertyCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Fix the clock used for default windows and sliding filters
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn build(&self, descriptor: &QueryDescriptor) -> Result<QueryPayload, BuildError> {
        let now = self.now.unwrap_or_else(Utc::now);

        match descriptor.query_type {
            QueryType::Events => {}
            QueryType::Funnel => {
                if descriptor.events.len() < 2 {
                    return Err(BuildError::NotEnoughFunnelSteps {
                        found: descriptor.events.len(),
                    });
                }
            }
            other => return Err(BuildError::UnsupportedQueryType(other)),
        }
        if descriptor.events.is_empty() {
            return Err(BuildError::NoEvents);
        }

        let range = descriptor.date_range.as_ref();
        let window = time_window(range, now, self.config.week_start)?;
        let ewp = build_events_with_properties(&descriptor.events, &self.config.operators, self.catalog, now)?;
        let gbp = build_group_by(&descriptor.breakdown, &descriptor.events, self.config, self.catalog)?;

        let base = WireQuery {
            cl: descriptor.query_type.as_str().to_string(),
            ty: descriptor.count_type.as_str().to_string(),
            ec: descriptor.breakdown_type.wire_token().to_string(),
            ewp,
            gbp,
            gbt: String::new(),
            tz: self.config.timezone.clone(),
            fr: window.from,
            to: window.to,
        };

        let payload = if descriptor.query_type == QueryType::Funnel {
            QueryPayload::Single(WireQuery {
                ty: CountType::UniqueUsers.as_str().to_string(),
                ec: BreakdownType::Any.wire_token().to_string(),
                ..base
            })
        } else {
            let frequency = resolve_frequency(range, window, self.config.default_frequency);
            let series = WireQuery {
                gbt: frequency.as_str().to_string(),
                ..base.clone()
            };
            if descriptor.breakdown_type == BreakdownType::Each {
                QueryPayload::Group(vec![series, base])
            } else {
                QueryPayload::Single(series)
            }
        };

        log::debug!(
            "built {} payload with {} queries over [{}, {}]",
            descriptor.query_type,
            payload.queries().len(),
            window.from,
            window.to
        );
        Ok(payload)
    }
}

/// Build a payload with the current clock and no catalog
pub fn build_query(descriptor: &QueryDescriptor, config: &QueryConfig) -> Result<QueryPayload, BuildError> {
    QueryBuilder::new(config).build(descriptor)
}
