use crate::{check_interval, Error, Result};

/// An implementation of a time-decaying value
///
/// Used as the exploration rate schedule, evaluated at the episode index.
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;

    /// Check that every value the schedule can produce lies in `[0,1]`
    fn validate_unit(&self) -> Result<()>;
}

/// For schedules that move linearly or stepwise from `vi` toward `vf`
fn validate(rate: f64, vi: f64, vf: f64) -> Result<()> {
    check_interval!("start", vi, 0.0, 1.0);
    check_interval!("end", vf, 0.0, 1.0);
    (rate.is_finite() && ((rate >= 0.0 && vi >= vf) || (rate < 0.0 && vi <= vf)))
        .then_some(())
        .ok_or(Error::InvalidDecay {
            rate,
            start: vi,
            end: vf,
        })
}

/// For schedules of the form v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * g(rt) with g(0) = 1
/// and g falling to 0, which approach `vf` from either side only while `rate` is non-negative
fn validate_asymptotic(rate: f64, vi: f64, vf: f64) -> Result<()> {
    check_interval!("start", vi, 0.0, 1.0);
    check_interval!("end", vf, 0.0, 1.0);
    check_interval!(rate, 0.0, f64::MAX);
    Ok(())
}

/// A constant value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }

    fn validate_unit(&self) -> Result<()> {
        check_interval!("epsilon", self.value, 0.0, 1.0);
        Ok(())
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Exponential {
    /// `rate` must be non-negative; the value moves from `vi` toward `vf` in either direction
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate_asymptotic(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }

    fn validate_unit(&self) -> Result<()> {
        validate_asymptotic(self.rate, self.vi, self.vf)
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) / (1 + rt)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InverseTime {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl InverseTime {
    /// `rate` must be non-negative; the value moves from `vi` toward `vf` in either direction
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate_asymptotic(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) / (1.0 + rate * t)
    }

    fn validate_unit(&self) -> Result<()> {
        validate_asymptotic(self.rate, self.vi, self.vf)
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        if rate >= 0.0 {
            (vi - rate * t).max(vf)
        } else {
            (vi - rate * t).min(vf)
        }
    }

    fn validate_unit(&self) -> Result<()> {
        validate(self.rate, self.vi, self.vf)
    }
}

/// v(t) = max(v<sub>i</sub> * r<sup>floor(t/s)</sup>, v<sub>f</sub>)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Step {
    rate: f64,
    vi: f64,
    vf: f64,
    step: f64,
}

impl Step {
    /// `rate` is the multiplicative factor applied every `step` episodes and must be in `[0,1]`
    pub fn new(rate: f64, vi: f64, vf: f64, step: f64) -> Result<Self> {
        check_interval!(rate, 0.0, 1.0);
        if step <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "step",
                value: step,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf, step })
    }
}

impl Decay for Step {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf, step } = self;
        (vi * rate.powf((t / step).floor())).max(vf)
    }

    fn validate_unit(&self) -> Result<()> {
        validate(self.rate, self.vi, self.vf)
    }
}
