//! Constant-rate zero and year-on-year inflation curves.

use std::rc::Weak;

use ql_core::{errors::Result, Observable, Observer, Rate, Time};
use ql_time::Date;

use super::inflation_term_structure::{
    InflationTermStructure, InflationTermStructureData, YoYInflationTermStructure,
    ZeroInflationTermStructure,
};
use crate::term_structure::{TermStructure, TermStructureData};

/// Constant zero-inflation rate.
///
/// Analogous to `FlatForward` for yield curves.
#[derive(Debug)]
pub struct FlatZeroInflationCurve {
    data: InflationTermStructureData,
    rate: Rate,
}

impl FlatZeroInflationCurve {
    /// Create a flat zero-inflation curve.  The base rate is taken from
    /// `data`, so a pending `data` makes a two-phase curve.
    pub fn new(data: InflationTermStructureData, rate: Rate) -> Self {
        Self { data, rate }
    }
}

impl Observable for FlatZeroInflationCurve {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.data().observable().subscribe(observer);
    }
    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.data().observable().unsubscribe(observer);
    }
    fn notify(&self) {
        self.data().observable().notify();
    }
}

impl TermStructure for FlatZeroInflationCurve {
    fn data(&self) -> &TermStructureData {
        self.data.term_structure()
    }
    fn max_date(&self) -> Result<Date> {
        Ok(Date::MAX)
    }
    fn min_date(&self) -> Result<Date> {
        self.base_date()
    }
}

impl InflationTermStructure for FlatZeroInflationCurve {
    fn inflation_data(&self) -> &InflationTermStructureData {
        &self.data
    }
    fn base_date(&self) -> Result<Date> {
        self.lagged_base_date()
    }
}

impl ZeroInflationTermStructure for FlatZeroInflationCurve {
    fn zero_rate_impl(&self, _t: Time) -> Rate {
        self.rate
    }
}

/// Constant YoY inflation rate.
#[derive(Debug)]
pub struct FlatYoYInflationCurve {
    data: InflationTermStructureData,
    rate: Rate,
}

impl FlatYoYInflationCurve {
    /// Create a flat YoY inflation curve.
    pub fn new(data: InflationTermStructureData, rate: Rate) -> Self {
        Self { data, rate }
    }
}

impl Observable for FlatYoYInflationCurve {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.data().observable().subscribe(observer);
    }
    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.data().observable().unsubscribe(observer);
    }
    fn notify(&self) {
        self.data().observable().notify();
    }
}

impl TermStructure for FlatYoYInflationCurve {
    fn data(&self) -> &TermStructureData {
        self.data.term_structure()
    }
    fn max_date(&self) -> Result<Date> {
        Ok(Date::MAX)
    }
    fn min_date(&self) -> Result<Date> {
        self.base_date()
    }
}

impl InflationTermStructure for FlatYoYInflationCurve {
    fn inflation_data(&self) -> &InflationTermStructureData {
        &self.data
    }
    fn base_date(&self) -> Result<Date> {
        self.lagged_base_date()
    }
}

impl YoYInflationTermStructure for FlatYoYInflationCurve {
    fn yoy_rate_impl(&self, _t: Time) -> Rate {
        self.rate
    }
}
