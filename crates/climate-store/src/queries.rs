//! Date-range filter for observation queries.
//!
//! Every observation query is bounded by date, and the two families of
//! queries disagree on whether the lower bound is inclusive. [`DateFilter`]
//! makes the bound kind part of the value so callers have to pick one.
//!
//! # Example
//!
//! ```ignore
//! use time::macros::date;
//!
//! // date >= 2017-01-01
//! let since = DateFilter::new().since(date!(2017 - 01 - 01));
//!
//! // date > 2017-01-01, chronological
//! let after = DateFilter::new().after(date!(2017 - 01 - 01)).ordered_by_date();
//!
//! // 2017-02-28 <= date <= 2017-03-05
//! let trip = DateFilter::between(date!(2017 - 02 - 28), date!(2017 - 03 - 05));
//! ```

use std::ops::Bound;

use time::Date;

/// Date bounds and ordering applied to the `measurements` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    /// Lower date bound.
    pub lower: Bound<Date>,
    /// Upper date bound.
    pub upper: Bound<Date>,
    /// Skip rows without a temperature.
    pub require_temperature: bool,
    /// Order rows ascending by date instead of storage order.
    pub order_by_date: bool,
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DateFilter {
    /// An unbounded filter in storage order.
    pub fn new() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
            require_temperature: false,
            order_by_date: false,
        }
    }

    /// Inclusive range `start <= date <= end`.
    pub fn between(start: Date, end: Date) -> Self {
        Self::new().since(start).until(end)
    }

    /// Keep rows on or after `date`.
    pub fn since(mut self, date: Date) -> Self {
        self.lower = Bound::Included(date);
        self
    }

    /// Keep rows strictly after `date`.
    pub fn after(mut self, date: Date) -> Self {
        self.lower = Bound::Excluded(date);
        self
    }

    /// Keep rows on or before `date`.
    pub fn until(mut self, date: Date) -> Self {
        self.upper = Bound::Included(date);
        self
    }

    /// Skip rows whose temperature is NULL.
    pub fn with_temperature(mut self) -> Self {
        self.require_temperature = true;
        self
    }

    /// Return rows in ascending date order.
    pub fn ordered_by_date(mut self) -> Self {
        self.order_by_date = true;
        self
    }

    /// Build the SQL WHERE clause and its date parameters.
    pub(crate) fn build_where(&self) -> (String, Vec<Date>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        match self.lower {
            Bound::Included(date) => {
                conditions.push("date >= ?");
                params.push(date);
            }
            Bound::Excluded(date) => {
                conditions.push("date > ?");
                params.push(date);
            }
            Bound::Unbounded => {}
        }

        match self.upper {
            Bound::Included(date) => {
                conditions.push("date <= ?");
                params.push(date);
            }
            Bound::Excluded(date) => {
                conditions.push("date < ?");
                params.push(date);
            }
            Bound::Unbounded => {}
        }

        if self.require_temperature {
            conditions.push("tobs IS NOT NULL");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    /// Build a full SELECT of `columns` from the measurements table.
    pub(crate) fn build_sql(&self, columns: &str) -> (String, Vec<Date>) {
        let (where_clause, params) = self.build_where();

        let mut sql = format!("SELECT {} FROM {}", columns, crate::schema::MEASUREMENTS);
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }
        if self.order_by_date {
            sql.push_str(" ORDER BY date ASC");
        }

        (sql, params)
    }
}
