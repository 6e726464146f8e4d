use nalgebra::DVector;

// ─────────────────────────────────────────────
// Sign
// ─────────────────────────────────────────────

/// 三值符號；0 自成一類，不歸入正或負。
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of(x: f64) -> Sign {
        if x > 0.0 {
            Sign::Positive
        } else if x < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// 所有值是否同號（空集合視為一致）。
pub fn signs_consistent(values: &[f64]) -> bool {
    match values.first() {
        Some(&first) => {
            let sign = Sign::of(first);
            values.iter().all(|&v| Sign::of(v) == sign)
        }
        None => true,
    }
}

// ─────────────────────────────────────────────
// Central tendency / dispersion
// ─────────────────────────────────────────────

/// 中位數；偶數個元素時取中間兩者的平均。空集合回傳 `None`。
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// 母體標準差（除以 n）。少於兩個元素時為 0。
///
/// 不用 `DVector::variance`（E[x²] - E[x]²），改以離均差平方的平均計算，
/// 避免完全相同的斜率因抵銷誤差得到非零的標準差。
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let v = DVector::from_column_slice(values);
    let mean = v.mean();
    v.map(|x| (x - mean) * (x - mean)).mean().sqrt()
}
