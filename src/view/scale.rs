//! 链路宽度比例尺
//!
//! 把当前所有链路的计数区间 `[min, max]` 线性映射到 `[1, 5]`。

pub const MIN_WIDTH: f64 = 1.0;
pub const MAX_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkWidthScale {
    min: u64,
    max: u64,
}

impl LinkWidthScale {
    /// 恒为 [`MIN_WIDTH`] 的比例尺
    pub fn constant() -> Self {
        Self { min: 0, max: 0 }
    }

    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let mut bounds: Option<(u64, u64)> = None;
        for count in counts {
            bounds = Some(match bounds {
                None => (count, count),
                Some((lo, hi)) => (lo.min(count), hi.max(count)),
            });
        }
        match bounds {
            Some((min, max)) => Self { min, max },
            None => Self::constant(),
        }
    }

    pub fn width(&self, count: u64) -> f64 {
        // 所有计数相同时区间退化，避免除零
        if self.min == self.max {
            return MIN_WIDTH;
        }
        let span = (self.max - self.min) as f64;
        let t = (count as f64 - self.min as f64) / span;
        MIN_WIDTH + t * (MAX_WIDTH - MIN_WIDTH)
    }
}
