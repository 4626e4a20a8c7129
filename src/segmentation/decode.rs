use crate::{Error, Result};

/// Number of classes the model scores per pixel. The palette is sized to match.
pub const NUM_CLASSES: usize = 5;

/// Square grid of per-pixel class labels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionGrid {
    side: usize,
    labels: Vec<u8>,
}

impl PredictionGrid {
    pub fn from_labels(side: usize, labels: Vec<u8>) -> Result<Self> {
        if side == 0 || labels.len() != side * side {
            return Err(Error::TensorShape {
                what: "prediction grid",
                expected: side * side,
                actual: labels.len(),
            });
        }
        Ok(Self { side, labels })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.labels.get(row * self.side + col).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.chunks_exact(self.side)
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }
}

/// Index of the largest score. Ties go to the lowest index and NaN never wins.
pub fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] || (scores[best].is_nan() && !score.is_nan()) {
            best = index;
        }
    }
    best
}

/// Turns a flat `side × side × num_classes` score buffer into a label grid.
pub fn decode_scores(scores: &[f32], side: usize, num_classes: usize) -> Result<PredictionGrid> {
    let expected = side * side * num_classes;
    if num_classes == 0 || scores.len() != expected {
        return Err(Error::TensorShape {
            what: "output",
            expected,
            actual: scores.len(),
        });
    }

    let labels = scores
        .chunks_exact(num_classes)
        .map(|block| {
            u8::try_from(argmax(block))
                .map_err(|_| Error::inference(format!("{} classes exceed label range", num_classes)))
        })
        .collect::<Result<Vec<_>>>()?;

    PredictionGrid::from_labels(side, labels)
}
