//! Accuracy and the per-class evaluation table printed by the trainer.

use crate::encoding::LabelVocab;
use ndarray::Array1;
use std::fmt;

/// Fraction of predictions equal to the truth.
pub fn accuracy(truth: &Array1<usize>, pred: &Array1<usize>) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth.iter().zip(pred.iter()).filter(|(t, p)| t == p).count();
    correct as f64 / truth.len() as f64
}

/// Precision/recall/F1/support for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics plus the usual aggregate rows.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes: Vec<ClassReport>,
    pub accuracy: f64,
    pub macro_avg: (f64, f64, f64),
    pub weighted_avg: (f64, f64, f64),
    pub total: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

/// Builds the report over every class present in the truth or the predictions.
pub fn classification_report(
    truth: &Array1<usize>,
    pred: &Array1<usize>,
    vocab: &LabelVocab,
) -> ClassificationReport {
    let mut present: Vec<usize> = truth.iter().chain(pred.iter()).copied().collect();
    present.sort();
    present.dedup();

    let mut classes = Vec::with_capacity(present.len());
    for class in present {
        let tp = truth
            .iter()
            .zip(pred.iter())
            .filter(|(t, p)| **t == class && **p == class)
            .count();
        let predicted = pred.iter().filter(|p| **p == class).count();
        let support = truth.iter().filter(|t| **t == class).count();

        let precision = ratio(tp, predicted);
        let recall = ratio(tp, support);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        let label = vocab
            .name_of(class)
            .map(str::to_string)
            .unwrap_or_else(|| format!("class {class}"));
        classes.push(ClassReport { label, precision, recall, f1, support });
    }

    let total = truth.len();
    let n = classes.len().max(1) as f64;
    let macro_avg = (
        classes.iter().map(|c| c.precision).sum::<f64>() / n,
        classes.iter().map(|c| c.recall).sum::<f64>() / n,
        classes.iter().map(|c| c.f1).sum::<f64>() / n,
    );
    let weight = total.max(1) as f64;
    let weighted_avg = (
        classes.iter().map(|c| c.precision * c.support as f64).sum::<f64>() / weight,
        classes.iter().map(|c| c.recall * c.support as f64).sum::<f64>() / weight,
        classes.iter().map(|c| c.f1 * c.support as f64).sum::<f64>() / weight,
    );

    ClassificationReport {
        classes,
        accuracy: accuracy(truth, pred),
        macro_avg,
        weighted_avg,
        total,
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.len())
            .chain(["weighted avg".len()].into_iter())
            .max()
            .unwrap_or(12);

        writeln!(f, "{:>width$}  precision    recall  f1-score   support", "")?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$}      {:.2}      {:.2}      {:.2}       {:>3}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>width$}                          {:.2}       {:>3}", "accuracy", self.accuracy, self.total)?;
        let (p, r, f1) = self.macro_avg;
        writeln!(f, "{:>width$}      {p:.2}      {r:.2}      {f1:.2}       {:>3}", "macro avg", self.total)?;
        let (p, r, f1) = self.weighted_avg;
        writeln!(f, "{:>width$}      {p:.2}      {r:.2}      {f1:.2}       {:>3}", "weighted avg", self.total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RemedyRecord;
    use ndarray::array;

    fn vocab() -> LabelVocab {
        let records: Vec<RemedyRecord> = ["Chamomile Tea", "Ginger Tea"]
            .iter()
            .map(|name| RemedyRecord {
                remedy_name: name.to_string(),
                condition: String::new(),
                age_group: String::new(),
                dietary_preferences: String::new(),
                ingredients: String::new(),
                recipe: String::new(),
                dosage: String::new(),
                cautions: String::new(),
                contraindications: String::new(),
            })
            .collect();
        LabelVocab::fit(&records)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn accuracy_counts_matches() {
        let truth = array![0usize, 0, 1, 1];
        let pred = array![0usize, 1, 1, 1];
        assert!(close(accuracy(&truth, &pred), 0.75));
    }

    #[test]
    fn per_class_metrics_are_exact() {
        let truth = array![0usize, 0, 1, 1];
        let pred = array![0usize, 1, 1, 1];
        let report = classification_report(&truth, &pred, &vocab());

        assert_eq!(report.classes.len(), 2);
        let chamomile = &report.classes[0];
        assert_eq!(chamomile.label, "Chamomile Tea");
        assert!(close(chamomile.precision, 1.0));
        assert!(close(chamomile.recall, 0.5));
        assert!(close(chamomile.f1, 2.0 / 3.0));
        assert_eq!(chamomile.support, 2);

        let ginger = &report.classes[1];
        assert!(close(ginger.precision, 2.0 / 3.0));
        assert!(close(ginger.recall, 1.0));
        assert!(close(ginger.f1, 0.8));

        assert!(close(report.accuracy, 0.75));
        assert!(close(report.macro_avg.0, (1.0 + 2.0 / 3.0) / 2.0));
        assert_eq!(report.total, 4);
    }

    #[test]
    fn a_class_never_predicted_scores_zero_precision() {
        let truth = array![0usize, 1];
        let pred = array![1usize, 1];
        let report = classification_report(&truth, &pred, &vocab());
        assert!(close(report.classes[0].precision, 0.0));
        assert!(close(report.classes[0].recall, 0.0));
        assert!(close(report.classes[0].f1, 0.0));
    }

    #[test]
    fn display_renders_every_row() {
        let truth = array![0usize, 0, 1, 1];
        let pred = array![0usize, 1, 1, 1];
        let text = classification_report(&truth, &pred, &vocab()).to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("Chamomile Tea"));
        assert!(text.contains("Ginger Tea"));
        assert!(text.contains("accuracy"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
    }
}
