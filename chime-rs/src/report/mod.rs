//! Tabular output of projection series.
mod table;
pub use table::*;

use crate::{
    models::Trajectory,
    prelude::{Category, Day, PerCategory, Series},
    resources::{BedSeries, PpeItem, PpeSeries, StaffRole, StaffingSeries, WardDemand},
};
use chrono::NaiveDate;

/// Series that can be rendered as a dated table.
pub trait ToTable {
    fn to_table(&self, census_date: NaiveDate) -> Table;
}

impl ToTable for Trajectory {
    fn to_table(&self, census_date: NaiveDate) -> Table {
        let mut table = Table::new(&self.day, census_date);
        table
            .add_column("susceptible", &self.susceptible)
            .add_column("infected", &self.infected)
            .add_column("recovered", &self.recovered);
        table
    }
}

impl ToTable for BedSeries {
    fn to_table(&self, census_date: NaiveDate) -> Table {
        let mut table = Table::new(&self.day, census_date);
        table
            .add_column("total", &self.total)
            .add_column("non_icu", &self.non_icu)
            .add_column("icu", &self.icu)
            .add_column("ventilators", &self.ventilators);
        table
    }
}

impl ToTable for PpeSeries {
    fn to_table(&self, census_date: NaiveDate) -> Table {
        let mut table = Table::new(&self.day, census_date);
        for &item in PpeItem::ALL.iter() {
            add_ward_columns(&mut table, item.key(), self.item(item));
        }
        table
    }
}

impl ToTable for StaffingSeries {
    fn to_table(&self, census_date: NaiveDate) -> Table {
        let mut table = Table::new(&self.day, census_date);
        for &role in StaffRole::ALL.iter() {
            add_ward_columns(&mut table, role.key(), self.role(role));
        }
        table
    }
}

/// Table with one column per disposition category.
pub fn category_table(day: &[Day], series: &PerCategory<Series>, census_date: NaiveDate) -> Table {
    let mut table = Table::new(day, census_date);
    for &category in Category::ALL.iter() {
        table.add_column(category.key(), series.get(category));
    }
    table
}

fn add_ward_columns(table: &mut Table, key: &str, demand: &WardDemand) {
    table
        .add_column(&format!("{}_non_icu", key), &demand.non_icu)
        .add_column(&format!("{}_icu", key), &demand.icu)
        .add_column(&format!("{}_total", key), &demand.total);
}
