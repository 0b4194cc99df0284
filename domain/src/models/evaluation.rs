use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{DomainErrorKind, DomainResult, domain_error};

/// 訓練損失のメトリクスキー
pub const TRAIN_LOSS_KEY: &str = "train_loss";
/// 検証損失のメトリクスキー
pub const VALIDATION_LOSS_KEY: &str = "validation_loss";

/// 実験管理サービスに記録されたメトリクスの1点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// ステップ（エポック）
    pub step: i64,
    /// 値
    pub value: f64,
    /// 記録日時
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// 折れ線グラフの点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: f64,
}

/// 折れ線グラフの系列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// 凡例に表示するラベル
    pub label: String,
    /// 点
    pub points: Vec<Point>,
}

impl Series {
    /// メトリクスの履歴から系列を作成する。
    ///
    /// 点はステップ順に並べ、同じステップの点は記録日時順に並べる。
    pub fn from_history(label: impl Into<String>, mut history: Vec<MetricPoint>) -> Self {
        history.sort_by(|a, b| a.step.cmp(&b.step).then(a.timestamp.cmp(&b.timestamp)));
        Self {
            label: label.into(),
            points: history
                .into_iter()
                .map(|m| Point {
                    x: m.step,
                    y: m.value,
                })
                .collect(),
        }
    }
}

/// 折れ線グラフ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl LineChart {
    /// 訓練損失と検証損失の履歴から損失曲線を作成する。
    pub fn loss_curves(train: Vec<MetricPoint>, validation: Vec<MetricPoint>) -> Self {
        Self {
            title: String::from("Train - Validation Loss Curves"),
            x_label: String::from("Epochs"),
            y_label: String::from("Loss"),
            series: vec![
                Series::from_history("Train Loss", train),
                Series::from_history("Validation Loss", validation),
            ],
        }
    }
}

/// 混同行列
///
/// `counts[i][j]`は、正解ラベルが`labels[i]`で、予測ラベルが`labels[j]`のサンプル数である。
/// ラベルは、正解ラベルと予測ラベルに現れた値の和集合を昇順に並べたものである。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    labels: Vec<usize>,
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// 正解ラベルと予測ラベルから混同行列を作成する。
    ///
    /// # 引数
    ///
    /// * `y_true` - 正解ラベル
    /// * `y_pred` - 予測ラベル
    pub fn new(y_true: &[usize], y_pred: &[usize]) -> DomainResult<Self> {
        if y_true.is_empty() {
            return Err(domain_error(
                DomainErrorKind::Validation,
                "y_true and y_pred must not be empty",
            ));
        }
        if y_true.len() != y_pred.len() {
            return Err(domain_error(
                DomainErrorKind::Validation,
                format!(
                    "y_true and y_pred must have the same length: {} != {}",
                    y_true.len(),
                    y_pred.len()
                ),
            ));
        }

        let labels = y_true
            .iter()
            .chain(y_pred.iter())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let mut counts = vec![vec![0u64; labels.len()]; labels.len()];
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            // ラベルは和集合から作成しているため、必ず見つかる
            if let (Ok(i), Ok(j)) = (labels.binary_search(t), labels.binary_search(p)) {
                counts[i][j] += 1;
            }
        }

        Ok(Self { labels, counts })
    }

    /// 行列に現れるラベルを返す。
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// 行列の大きさ（クラス数）を返す。
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// 行ごとに正規化した行列を返す。
    ///
    /// 正解ラベルとして現れないクラスの行は、すべて0になる。
    pub fn normalized(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total = row.iter().sum::<u64>();
                row.iter()
                    .map(|&count| {
                        if total == 0 {
                            0.0
                        } else {
                            count as f64 / total as f64
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// 文字色を切り替える閾値（最大値と最小値の中間）を返す。
    pub fn threshold(&self) -> f64 {
        let values = self.counts.iter().flatten().copied();
        let max = values.clone().max().unwrap_or(0);
        let min = values.min().unwrap_or(0);
        (max + min) as f64 / 2.0
    }
}

/// 混同行列のセルに表示する文字の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    White,
    Black,
}

/// 混同行列のセル
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrixCell {
    /// 行（正解ラベル）
    pub row: usize,
    /// 列（予測ラベル）
    pub column: usize,
    /// サンプル数
    pub count: u64,
    /// 行で正規化した割合
    pub ratio: f64,
    /// セルに表示する文字列
    pub text: String,
    /// セルに表示する文字の色
    pub text_color: TextColor,
}

/// 混同行列グラフの表示オプション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrixOptions {
    /// 軸に表示するクラス名
    ///
    /// 指定しない場合、または空の場合は、0から始まる連番を表示する。
    #[serde(default)]
    pub classes: Option<Vec<String>>,
    /// グラフの大きさ（インチ）
    #[serde(default = "default_figsize")]
    pub figsize: [f64; 2],
    /// セルに表示する文字の大きさ
    #[serde(default = "default_text_size")]
    pub text_size: u32,
}

fn default_figsize() -> [f64; 2] {
    [10.0, 10.0]
}

fn default_text_size() -> u32 {
    15
}

impl Default for ConfusionMatrixOptions {
    fn default() -> Self {
        Self {
            classes: None,
            figsize: default_figsize(),
            text_size: default_text_size(),
        }
    }
}

/// 混同行列グラフ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionMatrixChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// 両軸の目盛りに表示するラベル
    pub tick_labels: Vec<String>,
    pub figsize: [f64; 2],
    pub text_size: u32,
    /// 文字色を切り替える閾値
    pub threshold: f64,
    /// セル（行優先）
    pub cells: Vec<ConfusionMatrixCell>,
}

impl ConfusionMatrixChart {
    /// 混同行列からグラフを作成する。
    pub fn new(matrix: &ConfusionMatrix, options: ConfusionMatrixOptions) -> DomainResult<Self> {
        let size = matrix.size();
        let tick_labels = match options.classes {
            Some(classes) if !classes.is_empty() => {
                if classes.len() != size {
                    return Err(domain_error(
                        DomainErrorKind::Validation,
                        format!(
                            "the number of classes must be {}, but {} were given",
                            size,
                            classes.len()
                        ),
                    ));
                }
                classes
            }
            _ => (0..size).map(|i| i.to_string()).collect(),
        };

        let threshold = matrix.threshold();
        let cells = matrix
            .counts()
            .iter()
            .zip(matrix.normalized())
            .enumerate()
            .flat_map(|(row, (counts, ratios))| {
                counts
                    .iter()
                    .zip(ratios)
                    .enumerate()
                    .map(move |(column, (&count, ratio))| ConfusionMatrixCell {
                        row,
                        column,
                        count,
                        ratio,
                        text: format!("{} ({:.1}%)", count, ratio * 100.0),
                        text_color: if count as f64 > threshold {
                            TextColor::White
                        } else {
                            TextColor::Black
                        },
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(Self {
            title: String::from("Confusion Matrix"),
            x_label: String::from("Predicted label"),
            y_label: String::from("True label"),
            tick_labels,
            figsize: options.figsize,
            text_size: options.text_size,
            threshold,
            cells,
        })
    }
}
