use crate::prelude::{Day, PerCategory, Real, Series};

/// Available beds and ventilators per day. Negative values are shortages.
#[derive(Debug, Clone, PartialEq)]
pub struct BedSeries {
    pub day: Vec<Day>,
    pub non_icu: Series,
    pub icu: Series,
    pub ventilators: Series,
    pub total: Series,
}

impl BedSeries {
    /// Capacity left after subtracting the census. ICU beds are part of the
    /// total bed count, ventilators are tracked on their own.
    pub fn compute(
        day: &[Day],
        census: &PerCategory<Series>,
        total_beds: u32,
        icu_beds: u32,
        ventilators: u32,
    ) -> BedSeries {
        let total_beds = total_beds as Real;
        let icu_beds = icu_beds as Real;
        let non_icu_beds = total_beds - icu_beds;

        BedSeries {
            day: day.to_vec(),
            non_icu: census.non_icu.mapv(|x| non_icu_beds - x),
            icu: census.icu.mapv(|x| icu_beds - x),
            ventilators: census.ventilators.mapv(|x| ventilators as Real - x),
            total: (&census.non_icu + &census.icu).mapv(|x| total_beds - x),
        }
    }

    /// Lend spare beds between the non-ICU and ICU wards.
    ///
    /// Each day, a ward short of beds borrows as many as it needs from the
    /// other ward's surplus. The total is unchanged and ventilators never
    /// take part.
    pub fn reallocate(&self) -> BedSeries {
        let mut non_icu = self.non_icu.clone();
        let mut icu = self.icu.clone();

        for t in 0..self.day.len() {
            let (a, b) = (non_icu[t], icu[t]);
            if a < 0.0 && b > 0.0 {
                let moved = a.abs().min(b);
                non_icu[t] = a + moved;
                icu[t] = b - moved;
            } else if b < 0.0 && a > 0.0 {
                let moved = b.abs().min(a);
                icu[t] = b + moved;
                non_icu[t] = a - moved;
            }
        }

        BedSeries {
            day: self.day.clone(),
            non_icu,
            icu,
            ventilators: self.ventilators.clone(),
            total: self.total.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.day.len()
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_empty()
    }
}
