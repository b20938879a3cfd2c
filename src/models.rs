use serde::{Deserialize, Serialize};

/// One named series of a bar table: a value per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSet {
    pub name: String,
    pub values: Vec<f64>,
}

/// Categorised values read from a bar-style CSV.
///
/// Every set in `sets` has exactly `categories.len()` values; `values[i]`
/// belongs to `categories[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTable {
    /// First header cell. Used as the default category-axis title.
    pub corner: String,
    pub categories: Vec<String>,
    pub sets: Vec<BarSet>,
}

impl BarTable {
    /// All values across all sets, in set order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.sets.iter().flat_map(|s| s.values.iter().copied())
    }

    /// Per-category `(positive_sum, negative_sum)` as drawn by a stacked bar chart.
    pub fn stack_totals(&self) -> Vec<(f64, f64)> {
        let mut totals = vec![(0.0, 0.0); self.categories.len()];
        for set in &self.sets {
            for (slot, v) in totals.iter_mut().zip(&set.values) {
                if *v >= 0.0 {
                    slot.0 += v;
                } else {
                    slot.1 += v;
                }
            }
        }
        totals
    }
}

/// A single scatter observation. `label` is the title of the block it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
    pub series: Vec<ScatterSeries>,
}

impl ScatterData {
    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> + '_ {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

/// Parsed chart input, either shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ChartData {
    Bar(BarTable),
    Scatter(ScatterData),
}

impl ChartData {
    /// Series names in drawing order.
    pub fn series_names(&self) -> Vec<&str> {
        match self {
            ChartData::Bar(t) => t.sets.iter().map(|s| s.name.as_str()).collect(),
            ChartData::Scatter(d) => d.series.iter().map(|s| s.name.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BarTable {
        BarTable {
            corner: "lib".into(),
            categories: vec!["a".into(), "b".into()],
            sets: vec![
                BarSet {
                    name: "s1".into(),
                    values: vec![1.0, -2.0],
                },
                BarSet {
                    name: "s2".into(),
                    values: vec![3.0, -4.0],
                },
            ],
        }
    }

    #[test]
    fn stack_totals_split_signs() {
        assert_eq!(table().stack_totals(), vec![(4.0, 0.0), (0.0, -6.0)]);
    }

    #[test]
    fn json_is_tagged_by_shape() {
        let v = serde_json::to_value(ChartData::Bar(table())).unwrap();
        assert_eq!(v["shape"], "bar");
        assert_eq!(v["sets"][1]["name"], "s2");
    }
}
