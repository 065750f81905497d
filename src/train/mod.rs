//! Training driver.
//!
//! Wires the pieces together: load the CSVs, build a seeded MLP, walk the
//! training set in cyclic batches, and snapshot the parameters at the end.
//! The loss is the batch mean of the per-class squared error against
//! `{+1,-1}` targets; every pass zeroes the parameter gradients, builds a
//! fresh loss graph, backpropagates, and steps each parameter by
//! `data -= lr * grad`. Pixels go in raw, exactly as read from the CSV.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;

use crate::autograd::Value;
use crate::config::Config;
use crate::data::{load_from_csv, Dataset, Example};
use crate::nn::{Mlp, NnError};
use crate::snapshot;

/// Builds the loss graph for one batch and scores its predictions.
///
/// The returned loss node is the mean over the batch of
/// `Σ_class (target - score)^2`, with the targets participating in the
/// graph as constant leaves. Accuracy is computed outside the graph:
/// a prediction is the index of the largest output, first one winning ties,
/// and is correct when it equals the example's label.
///
/// # Errors
///
/// [`NnError::ShapeMismatch`] when an example's width does not fit the
/// model or the model's output width differs from `num_classes`.
///
/// # Panics
///
/// Panics on an empty batch.
pub fn batch_loss(
    mlp: &Mlp,
    batch: &[&Example],
    num_classes: usize,
) -> Result<(Value, f64), NnError> {
    assert!(!batch.is_empty(), "batch must not be empty");

    let mut err = Value::new(0.0);
    let mut correct = 0usize;
    for example in batch {
        let inputs: Vec<Value> = example.features().iter().copied().map(Value::new).collect();
        let scores = mlp.forward(&inputs)?;
        if scores.len() != num_classes {
            return Err(NnError::ShapeMismatch {
                expected: num_classes,
                got: scores.len(),
            });
        }

        for (score, &target) in scores.iter().zip(example.targets(num_classes).iter()) {
            let diff = &Value::new(target) - score;
            err = &err + &diff.pow(2.0);
        }

        let data: Vec<f64> = scores.iter().map(Value::data).collect();
        if argmax(&data) == example.label() {
            correct += 1;
        }
    }

    let loss = &err * (1.0 / batch.len() as f64);
    let accuracy = correct as f64 / batch.len() as f64;
    Ok((loss, accuracy))
}

/// Classification accuracy over the first `limit` examples of `dataset`,
/// forward passes only. `limit` is clamped to the dataset size; a limit of
/// zero scores nothing and yields NaN.
///
/// # Errors
///
/// [`NnError::ShapeMismatch`] when the dataset width does not fit the model.
pub fn evaluate(mlp: &Mlp, dataset: &Dataset, limit: usize) -> Result<f64, NnError> {
    let n = limit.min(dataset.len());
    let mut correct = 0usize;
    for example in dataset.examples().iter().take(n) {
        let inputs: Vec<Value> = example.features().iter().copied().map(Value::new).collect();
        let scores = mlp.forward(&inputs)?;
        let data: Vec<f64> = scores.iter().map(Value::data).collect();
        if argmax(&data) == example.label() {
            correct += 1;
        }
    }
    Ok(correct as f64 / n as f64)
}

/// Runs the full pipeline with `cfg`: load, train, evaluate periodically,
/// save the snapshot. Progress goes to stdout.
///
/// # Errors
///
/// Any configuration, dataset, model, or snapshot error along the way.
pub fn run(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    run_impl(cfg, None)
}

/// `run` with a batch cap so tests can cut the walk short.
fn run_impl(cfg: &Config, max_batches: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    cfg.validate()?;

    let train_set = load_from_csv(&cfg.train_path, cfg.num_classes)?;
    let test_set = load_from_csv(&cfg.test_path, cfg.num_classes)?;
    for set in [&train_set, &test_set] {
        if set.width() != cfg.input_dim {
            return Err(Box::new(NnError::ShapeMismatch {
                expected: cfg.input_dim,
                got: set.width(),
            }));
        }
    }
    println!("train examples: {}", train_set.len());
    println!("test examples:  {}", test_set.len());
    if let Some(side) = square_side(train_set.width()) {
        let first = &train_set.examples()[0];
        println!("first training example, label {}:", first.label());
        print!("{}", first.ascii(side));
    }

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let init = Normal::new(0.0, cfg.init_std)?;
    let mlp = Mlp::new(cfg.input_dim, &cfg.layer_sizes, &init, &mut rng)?;
    println!("parameters: {}", mlp.parameters().len());

    let batches = max_batches.map_or(cfg.num_batches, |m| m.min(cfg.num_batches));
    for batch_idx in 0..batches {
        let start = (batch_idx * cfg.batch_size) % train_set.len();
        let batch: Vec<&Example> = (0..cfg.batch_size)
            .map(|i| &train_set.examples()[(start + i) % train_set.len()])
            .collect();

        for pass in 0..cfg.passes_per_batch {
            let step = batch_idx * cfg.passes_per_batch + pass;
            let lr = learning_rate(cfg, step);
            let (loss, accuracy) = train_step(&mlp, &batch, cfg.num_classes, lr)?;
            println!(
                "batch {:3} / {:3} | pass {} / {} | loss {:8.4} | acc {:.3}",
                batch_idx + 1,
                batches,
                pass + 1,
                cfg.passes_per_batch,
                loss,
                accuracy
            );
        }

        if (batch_idx + 1) % cfg.eval_every == 0 {
            let accuracy = evaluate(&mlp, &test_set, cfg.eval_size)?;
            println!("eval  after batch {:3} | test acc {:.3}", batch_idx + 1, accuracy);
        }
    }

    snapshot::save(&cfg.snapshot_path, &mlp.parameter_data())?;
    println!(
        "snapshot: {} ({} values)",
        cfg.snapshot_path.display(),
        mlp.parameters().len()
    );
    Ok(())
}

/// One optimization pass over a batch: zero the parameter gradients, build
/// the loss, backpropagate, then update every parameter in place. Returns
/// the loss value and batch accuracy.
fn train_step(
    mlp: &Mlp,
    batch: &[&Example],
    num_classes: usize,
    lr: f64,
) -> Result<(f64, f64), NnError> {
    mlp.zero_grad();
    let (loss, accuracy) = batch_loss(mlp, batch, num_classes)?;
    loss.backward();
    for p in mlp.parameters() {
        p.set_data(p.data() - lr * p.grad());
    }
    Ok((loss.data(), accuracy))
}

/// Learning rate at a global step: linear decay from `lr_start` to
/// `lr_floor` across the full run, clamped at the floor after that.
fn learning_rate(cfg: &Config, step: usize) -> f64 {
    let total = cfg.total_steps().max(1);
    let frac = step as f64 / total as f64;
    (cfg.lr_start - (cfg.lr_start - cfg.lr_floor) * frac).max(cfg.lr_floor)
}

/// Index of the largest value, the first one winning ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Side length when `n` is a perfect square; images render as a grid.
fn square_side(n: usize) -> Option<usize> {
    let side = (n as f64).sqrt().round() as usize;
    (side * side == n).then_some(side)
}

#[cfg(test)]
mod tests {
    use crate::nn::{Layer, Neuron};

    use super::*;

    fn two_class_mlp() -> Mlp {
        Mlp::from_layers(vec![Layer::from_neurons(vec![
            Neuron::with_parameters(vec![0.5, -0.5], 0.0, false),
            Neuron::with_parameters(vec![0.25, 0.25], 0.0, false),
        ])])
    }

    #[test]
    fn argmax_prefers_the_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), 1);
        assert_eq!(argmax(&[5.0]), 0);
        assert_eq!(argmax(&[2.0, 2.0, 2.0]), 0);
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
    }

    #[test]
    fn learning_rate_decays_linearly_to_the_floor() {
        let cfg = Config::default();
        assert!((learning_rate(&cfg, 0) - 0.5).abs() < 1e-12);
        assert!((learning_rate(&cfg, 250) - 0.275).abs() < 1e-12);
        assert!((learning_rate(&cfg, 500) - 0.05).abs() < 1e-12);
        // Past the configured run length the floor holds.
        assert!((learning_rate(&cfg, 5000) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn batch_loss_matches_hand_computation() {
        let mlp = two_class_mlp();
        // Scores for [2, 4] are [-1, 1.5]; label 1 gives targets [-1, +1],
        // so the example contributes 0 + 0.25 and predicts correctly.
        let hit = Example::new(vec![2.0, 4.0], 1, 2).unwrap();
        // Scores for [2, 2] are [0, 1]; label 0 contributes 1 + 4 and
        // predicts class 1, a miss.
        let miss = Example::new(vec![2.0, 2.0], 0, 2).unwrap();

        let batch = [&hit, &miss];
        let (loss, accuracy) = batch_loss(&mlp, &batch, 2).unwrap();
        assert!((loss.data() - 2.625).abs() < 1e-10);
        assert!((accuracy - 0.5).abs() < 1e-12);

        let solo = [&hit];
        let (loss, accuracy) = batch_loss(&mlp, &solo, 2).unwrap();
        assert!((loss.data() - 0.25).abs() < 1e-10);
        assert!((accuracy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn batch_loss_rejects_wrong_output_width() {
        let mlp = Mlp::from_layers(vec![Layer::from_neurons(vec![
            Neuron::with_parameters(vec![1.0], 0.0, false),
        ])]);
        let example = Example::new(vec![1.0], 0, 2).unwrap();
        let batch = [&example];
        assert_eq!(
            batch_loss(&mlp, &batch, 2).unwrap_err(),
            NnError::ShapeMismatch { expected: 2, got: 1 }
        );
    }

    #[test]
    fn train_step_descends_the_loss() {
        let mlp = Mlp::from_layers(vec![Layer::from_neurons(vec![
            Neuron::with_parameters(vec![0.0], 0.0, false),
        ])]);
        let example = Example::new(vec![1.0], 0, 1).unwrap();
        let batch = [&example];

        // Score 0 against target +1: loss 1, d(loss)/d(score) = -2, so both
        // parameters move to 0.2 at lr 0.1.
        let (loss, _) = train_step(&mlp, &batch, 1, 0.1).unwrap();
        assert!((loss - 1.0).abs() < 1e-10);
        let params = mlp.parameter_data();
        assert!((params[0] - 0.2).abs() < 1e-10);
        assert!((params[1] - 0.2).abs() < 1e-10);

        let (after, _) = batch_loss(&mlp, &batch, 1).unwrap();
        assert!((after.data() - 0.36).abs() < 1e-10);
    }

    #[test]
    fn evaluate_clamps_limit_and_scores_argmax() {
        let mlp = Mlp::from_layers(vec![Layer::from_neurons(vec![
            Neuron::with_parameters(vec![1.0, 0.0], 0.0, false),
            Neuron::with_parameters(vec![0.0, 1.0], 0.0, false),
        ])]);
        let dataset = Dataset::new(vec![
            Example::new(vec![3.0, 1.0], 0, 2).unwrap(),
            Example::new(vec![1.0, 5.0], 1, 2).unwrap(),
            Example::new(vec![2.0, 9.0], 0, 2).unwrap(),
        ])
        .unwrap();

        let full = evaluate(&mlp, &dataset, 10).unwrap();
        assert!((full - 2.0 / 3.0).abs() < 1e-12);
        let clipped = evaluate(&mlp, &dataset, 2).unwrap();
        assert!((clipped - 1.0).abs() < 1e-12);
    }

    #[test]
    fn square_side_detects_perfect_squares() {
        assert_eq!(square_side(784), Some(28));
        assert_eq!(square_side(16), Some(4));
        assert_eq!(square_side(1), Some(1));
        assert_eq!(square_side(10), None);
    }

    #[test]
    fn run_trains_and_writes_a_loadable_snapshot() {
        let dir = std::env::temp_dir();
        let train_path = dir.join("micromlp_train_smoke_train.csv");
        let test_path = dir.join("micromlp_train_smoke_test.csv");
        let snapshot_path = dir.join("micromlp_train_smoke_weights.bin");
        std::fs::write(
            &train_path,
            "0,9,8,0,0\n1,0,0,9,8\n0,7,9,1,0\n1,1,0,8,9\n",
        )
        .unwrap();
        std::fs::write(&test_path, "0,9,9,0,0\n1,0,0,9,9\n").unwrap();

        let cfg = Config {
            train_path: train_path.clone(),
            test_path: test_path.clone(),
            snapshot_path: snapshot_path.clone(),
            input_dim: 4,
            layer_sizes: vec![3, 2],
            num_classes: 2,
            num_batches: 4,
            passes_per_batch: 2,
            batch_size: 2,
            eval_every: 2,
            eval_size: 5,
            ..Config::default()
        };
        run_impl(&cfg, Some(3)).unwrap();

        let values = snapshot::load(&snapshot_path).unwrap();
        // (4+1)*3 hidden parameters plus (3+1)*2 output parameters.
        assert_eq!(values.len(), 23);

        // A freshly built model of the same shape accepts the snapshot.
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let init = Normal::new(0.0, cfg.init_std).unwrap();
        let restored = Mlp::new(cfg.input_dim, &cfg.layer_sizes, &init, &mut rng).unwrap();
        restored.load_parameter_data(&values).unwrap();
        let acc = evaluate(&restored, &load_from_csv(&test_path, 2).unwrap(), 10).unwrap();
        assert!((0.0..=1.0).contains(&acc));

        for path in [&train_path, &test_path, &snapshot_path] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn run_rejects_dataset_width_mismatch() {
        let dir = std::env::temp_dir();
        let train_path = dir.join("micromlp_train_width_train.csv");
        let test_path = dir.join("micromlp_train_width_test.csv");
        std::fs::write(&train_path, "0,1,2,3\n").unwrap();
        std::fs::write(&test_path, "0,1,2,3\n").unwrap();

        let cfg = Config {
            train_path: train_path.clone(),
            test_path: test_path.clone(),
            snapshot_path: dir.join("micromlp_train_width_weights.bin"),
            input_dim: 4,
            layer_sizes: vec![2],
            num_classes: 2,
            ..Config::default()
        };
        let result = run_impl(&cfg, Some(1));
        for path in [&train_path, &test_path] {
            let _ = std::fs::remove_file(path);
        }
        let err = result.unwrap_err().to_string();
        assert!(err.contains("expected 4"), "unexpected error: {err}");
    }
}
