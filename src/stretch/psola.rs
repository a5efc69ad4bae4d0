//! Period mutators: time compression and expansion one pitch period at a
//! time, with linear cross-fades across the seam.
//!
//! [`skip_period`] deletes one period of input and fades the first period
//! into the second; [`insert_period`] repeats a period by emitting it
//! verbatim and then fading back into overlapping input. Fractional speed
//! factors are realized by the follow-up verbatim copy each mutator may owe
//! the driver.

use crate::core::queue::SampleQueue;
use crate::core::types::Sample;
use crate::error::SpeedError;

/// The outcome of one period mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    /// How far the driver's read cursor advances, in input samples.
    pub advance: usize,
    /// Upcoming input samples owed to the output verbatim before the next
    /// period is examined.
    pub remaining_copy: usize,
}

/// Skips one pitch period, cross-fading from the first period into the
/// second.
///
/// For `speed >= 2` every period produces `floor(period / (speed - 1))`
/// cross-faded samples and nothing more. Between 1 and 2 the cross-fade is
/// a full period and the fractional remainder of the ratio becomes a
/// verbatim copy debt.
///
/// Requires `speed > 1` and `samples.len() >= 2 * period`. The output
/// queue is untouched if it cannot grow.
pub fn skip_period(
    samples: &[Sample],
    speed: f64,
    period: usize,
    out: &mut SampleQueue,
) -> Result<Mutation, SpeedError> {
    debug_assert!(speed > 1.0);
    debug_assert!(samples.len() >= 2 * period);

    let (new_samples, remaining_copy) = if speed >= 2.0 {
        ((period as f64 / (speed - 1.0)) as usize, 0)
    } else {
        (
            period,
            (period as f64 * (2.0 - speed) / (speed - 1.0)) as usize,
        )
    };

    out.grow_for(new_samples)?;
    let scale = 1.0 / new_samples as f64;
    for t in 0..new_samples {
        let blend = samples[t] * (new_samples - t) as Sample + samples[t + period] * t as Sample;
        out.push((scale * f64::from(blend)) as Sample);
    }

    Ok(Mutation {
        advance: period + new_samples,
        remaining_copy,
    })
}

/// Inserts a pitch period: one period verbatim, then a cross-fade back into
/// input the driver will re-read.
///
/// The cursor advances by only the cross-fade length, so the next period
/// search overlaps the seam; that overlap is what repeats the period. Below
/// half speed the cross-fade shrinks to `floor(period * speed / (1 -
/// speed))` samples, clamped to at least 1 so the driver always makes
/// progress. From half speed up it is a full period plus a verbatim copy
/// debt.
///
/// Requires `0 < speed < 1` and `samples.len() >= 2 * period`. The output
/// queue is untouched if it cannot grow.
pub fn insert_period(
    samples: &[Sample],
    speed: f64,
    period: usize,
    out: &mut SampleQueue,
) -> Result<Mutation, SpeedError> {
    debug_assert!(speed > 0.0 && speed < 1.0);
    debug_assert!(samples.len() >= 2 * period);

    let (new_samples, remaining_copy) = if speed < 0.5 {
        (
            ((period as f64 * speed / (1.0 - speed)) as usize).max(1),
            0,
        )
    } else {
        (
            period,
            (period as f64 * (2.0 * speed - 1.0) / (1.0 - speed)) as usize,
        )
    };

    out.grow_for(period + new_samples)?;
    for &sample in &samples[..period] {
        out.push(sample);
    }
    let scale = 1.0 / new_samples as f64;
    for t in 0..new_samples {
        let blend = samples[t] * t as Sample + samples[t + period] * (new_samples - t) as Sample;
        out.push((scale * f64::from(blend)) as Sample);
    }

    Ok(Mutation {
        advance: new_samples,
        remaining_copy,
    })
}
