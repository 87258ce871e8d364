use super::{PpeItem, WardDemand};
use crate::{
    params::PpeRates,
    prelude::{Day, PerCategory, Real, Series, Wards},
};

/// Daily PPE consumption for each item.
#[derive(Debug, Clone, PartialEq)]
pub struct PpeSeries {
    pub day: Vec<Day>,
    /// One entry per item, in `PpeItem::ALL` order.
    pub items: Vec<WardDemand>,
}

impl PpeSeries {
    /// Each patient present on a given day consumes the ward's daily rate of
    /// every item. Partial patients are dropped.
    pub fn compute(day: &[Day], census: &PerCategory<Series>, rates: &Wards<PpeRates>) -> PpeSeries {
        let non_icu = census.non_icu.mapv(Real::floor);
        let icu = census.icu.mapv(Real::floor);

        let items = PpeItem::ALL
            .iter()
            .map(|&item| {
                let non_icu = &non_icu * rates.non_icu.rate(item);
                let icu = &icu * rates.icu.rate(item);
                let total = &non_icu + &icu;
                WardDemand { non_icu, icu, total }
            })
            .collect();

        PpeSeries {
            day: day.to_vec(),
            items,
        }
    }

    pub fn item(&self, item: PpeItem) -> &WardDemand {
        &self.items[item as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn consumption_uses_whole_patients() {
        let census = PerCategory::new(
            Array1::from(vec![0.0, 2.7, 10.0]),
            Array1::from(vec![1.2, 0.5, 3.0]),
            Array1::from(vec![100.0, 100.0, 100.0]),
        );
        let rates = PpeRates::default_rates();
        let ppe = PpeSeries::compute(&[0, 1, 2], &census, &rates);

        let n95 = ppe.item(PpeItem::MasksN95);
        assert_eq!(n95.non_icu.to_vec(), vec![0.0, 10.0, 50.0]);
        assert_eq!(n95.icu.to_vec(), vec![10.0, 0.0, 30.0]);
        assert_eq!(n95.total.to_vec(), vec![10.0, 10.0, 80.0]);

        let gloves = ppe.item(PpeItem::Gloves);
        assert_eq!(gloves.total[2], 10.0 * 10.0 + 3.0 * 20.0);
        assert_eq!(ppe.items.len(), PpeItem::ALL.len());
    }
}
