//! Plain-text summary of a dataset for the `report` command.

use std::fmt;

use climate_store::{Store, TableInfo};
use climate_types::{PrecipitationRecord, StationActivity, TemperatureHistogram, TemperatureSummary};

/// Number of precipitation records echoed in the report.
const PRECIPITATION_PREVIEW: usize = 5;

/// Widest histogram bar, in characters.
const BAR_WIDTH: u64 = 40;

/// Date ranges and bin count used to build a [`Report`].
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// First day of the trip (inclusive).
    pub trip_start: String,
    /// Last day of the trip (inclusive).
    pub trip_end: String,
    /// Lower bound (inclusive) of the precipitation series.
    pub precipitation_since: String,
    /// Lower bound (exclusive) of the temperature histogram.
    pub observations_after: String,
    /// Histogram bin count.
    pub histogram_bins: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            trip_start: "2017-02-28".to_string(),
            trip_end: "2017-03-05".to_string(),
            precipitation_since: "2017-01-01".to_string(),
            observations_after: "2017-01-06".to_string(),
            histogram_bins: 12,
        }
    }
}

/// Everything the `report` command prints.
#[derive(Debug, Clone)]
pub struct Report {
    pub options: ReportOptions,
    pub tables: Vec<TableInfo>,
    pub precipitation: Vec<PrecipitationRecord>,
    pub trip: Option<TemperatureSummary>,
    pub station_count: u64,
    pub ranking: Vec<StationActivity>,
    pub observation_count: usize,
    pub histogram: TemperatureHistogram,
}

impl Report {
    /// Run every query the report needs against `store`.
    pub fn build(store: &Store, options: ReportOptions) -> climate_store::Result<Self> {
        let tables = store.describe()?;
        let precipitation = store.list_precipitation_since(options.precipitation_since.as_str())?;
        let trip = store.calc_temps(options.trip_start.as_str(), options.trip_end.as_str())?;
        let station_count = store.count_total_stations()?;
        let ranking = store.rank_stations_by_observation_count()?;

        let observations = store.last_year_observations_for(options.observations_after.as_str())?;
        let temperatures: Vec<f64> = observations.iter().map(|o| o.temperature).collect();
        let histogram = TemperatureHistogram::from_temperatures(&temperatures, options.histogram_bins);

        Ok(Self {
            options,
            tables,
            precipitation,
            trip,
            station_count,
            ranking,
            observation_count: observations.len(),
            histogram,
        })
    }

    /// First element of the ranking.
    pub fn most_active(&self) -> Option<&StationActivity> {
        self.ranking.first()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset tables")?;
        for table in &self.tables {
            writeln!(f, "  {}", table.summary())?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Precipitation since {} ({} records)",
            self.options.precipitation_since,
            self.precipitation.len()
        )?;
        for record in self.precipitation.iter().take(PRECIPITATION_PREVIEW) {
            match record.precipitation {
                Some(prcp) => writeln!(f, "  {}  {:.2}", climate_types::format_date(record.date), prcp)?,
                None => writeln!(f, "  {}  -", climate_types::format_date(record.date))?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Trip temperatures {} to {}",
            self.options.trip_start, self.options.trip_end
        )?;
        match &self.trip {
            Some(t) => writeln!(
                f,
                "  TMIN {:.1}  TAVG {:.1}  TMAX {:.1}  (spread {:.1})",
                t.min,
                t.avg,
                t.max,
                t.spread()
            )?,
            None => writeln!(f, "  no observations in range")?,
        }

        writeln!(f)?;
        writeln!(f, "There are {} stations.", self.station_count)?;

        writeln!(f)?;
        writeln!(f, "Stations by observation count")?;
        for activity in &self.ranking {
            writeln!(f, "  {}", activity)?;
        }
        match self.most_active() {
            Some(station) => writeln!(f, "Most active station: {}", station)?,
            None => writeln!(f, "Most active station: none")?,
        }

        writeln!(f)?;
        writeln!(
            f,
            "Temperature observations after {} ({})",
            self.options.observations_after, self.observation_count
        )?;
        let peak = self.histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
        for bin in &self.histogram.bins {
            let bar = if peak == 0 { 0 } else { bin.count * BAR_WIDTH / peak };
            writeln!(
                f,
                "  {:>6.1} - {:>6.1}  {:<width$} {}",
                bin.lower,
                bin.upper,
                "#".repeat(bar as usize),
                bin.count,
                width = BAR_WIDTH as usize
            )?;
        }

        Ok(())
    }
}
