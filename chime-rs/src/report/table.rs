use crate::{
    error::Result,
    prelude::{Day, Real, Series},
};
use chrono::{Duration, NaiveDate};
use std::{fs::File, io, path::Path};

/// Day-indexed table of named columns.
///
/// This is the only place where series are addressed by name. It exists to
/// render CSV files and floored views of the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    day: Vec<Day>,
    date: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Series>,
}

impl Table {
    /// Empty table for the given days. Dates count from the census date.
    pub fn new(day: &[Day], census_date: NaiveDate) -> Self {
        Table {
            day: day.to_vec(),
            date: day.iter().map(|&d| census_date + Duration::days(d)).collect(),
            names: vec![],
            columns: vec![],
        }
    }

    /// Append a column. Columns shorter than the table are padded with NaN
    /// and longer columns are truncated.
    pub fn add_column(&mut self, name: &str, data: &Series) -> &mut Self {
        let n = self.day.len();
        let column = Series::from_shape_fn(n, |i| data.get(i).copied().unwrap_or(Real::NAN));
        self.names.push(name.to_string());
        self.columns.push(column);
        self
    }

    pub fn nrows(&self) -> usize {
        self.day.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn day(&self) -> &[Day] {
        &self.day
    }

    pub fn date(&self) -> &[NaiveDate] {
        &self.date
    }

    /// Column with the given name.
    pub fn get(&self, name: &str) -> Option<&Series> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.columns.get(idx)
    }

    /// Copy of the table with every value rounded down.
    pub fn floor(&self) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.mapv(Real::floor)).collect(),
            ..self.clone()
        }
    }

    /// Write the table as CSV with `day` and `date` leading columns.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let mut head = vec!["day".to_string(), "date".to_string()];
        head.extend(self.names.iter().cloned());
        wtr.write_record(&head)?;

        for i in 0..self.nrows() {
            let mut row = vec![self.day[i].to_string(), self.date[i].to_string()];
            row.extend(self.columns.iter().map(|c| c[i].to_string()));
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render as a CSV string.
    pub fn render_csv(&self) -> Result<String> {
        let mut buf = vec![];
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Save as a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn table() -> Table {
        let mut table = Table::new(&[-1, 0, 1], NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
        table
            .add_column("a", &Array1::from(vec![1.5, 2.25, 3.0]))
            .add_column("b", &Array1::from(vec![-0.5, 7.0]));
        table
    }

    #[test]
    fn dates_follow_days() {
        let t = table();
        assert_eq!(t.date()[0], NaiveDate::from_ymd_opt(2020, 3, 31).unwrap());
        assert_eq!(t.ncols(), 2);
        assert!(t.get("b").unwrap()[2].is_nan());
        assert!(t.get("c").is_none());
    }

    #[test]
    fn floor_rounds_down() {
        let t = table().floor();
        assert_eq!(t.get("a").unwrap().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(t.get("b").unwrap()[0], -1.0);
    }

    #[test]
    fn renders_csv() {
        let csv = table().render_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "day,date,a,b");
        assert_eq!(lines[1], "-1,2020-03-31,1.5,-0.5");
        assert_eq!(lines[3], "1,2020-04-02,3,NaN");
    }
}
