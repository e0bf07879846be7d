//! Candlestick shape rules.
//!
//! Every function inspects only the trailing bars of the slice it is given.
//! Single-bar rules ignore bars with a zero high-low range: a bar that never
//! traded away from one price has no shape to classify.

use crate::domain::PriceBar;

fn last_n(bars: &[PriceBar], n: usize) -> Option<&[PriceBar]> {
    (bars.len() >= n).then(|| &bars[bars.len() - n..])
}

pub fn is_bullish_engulfing(bars: &[PriceBar]) -> bool {
    let Some([prev, curr]) = last_n(bars, 2) else {
        return false;
    };
    prev.is_bearish()
        && curr.is_bullish()
        && curr.open <= prev.close
        && curr.close >= prev.open
}

pub fn is_bearish_engulfing(bars: &[PriceBar]) -> bool {
    let Some([prev, curr]) = last_n(bars, 2) else {
        return false;
    };
    prev.is_bullish()
        && curr.is_bearish()
        && curr.open >= prev.close
        && curr.close <= prev.open
}

pub fn is_hammer(bars: &[PriceBar]) -> bool {
    let Some(bar) = bars.last() else {
        return false;
    };
    let body = bar.body();
    bar.range() > 0.0
        && bar.lower_shadow() >= 2.0 * body
        && bar.upper_shadow() <= body
        && body <= 0.3 * bar.range()
}

pub fn is_shooting_star(bars: &[PriceBar]) -> bool {
    let Some(bar) = bars.last() else {
        return false;
    };
    let body = bar.body();
    bar.range() > 0.0
        && bar.upper_shadow() >= 2.0 * body
        && bar.lower_shadow() <= body
        && body <= 0.3 * bar.range()
}

pub fn is_doji(bars: &[PriceBar]) -> bool {
    let Some(bar) = bars.last() else {
        return false;
    };
    bar.range() > 0.0 && bar.body() <= 0.05 * bar.range()
}

pub fn is_morning_star(bars: &[PriceBar]) -> bool {
    let Some([first, middle, last]) = last_n(bars, 3) else {
        return false;
    };
    if !first.is_bearish() {
        return false;
    }
    let first_body = first.body();
    let midpoint = (first.open + first.close) / 2.0;
    middle.body() < 0.3 * first_body && last.is_bullish() && last.close > midpoint
}
