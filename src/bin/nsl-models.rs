//! nsl-models: list the built-in fit models with their equations and parameters.

use clap::Parser;
use nsl_fit::{BasicModel, FitModel, ModelCategory, ModelKind};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "nsl-models",
    version,
    about = "List the built-in fit models, their equations and start values"
)]
struct Cli {
    /// Only this category: basic, peak, growth or distribution
    #[arg(short, long, value_parser = parse_category)]
    category: Option<ModelCategory>,

    /// Degree used for models that take one (polynomial order, terms, peaks)
    #[arg(short, long, default_value_t = 1)]
    degree: usize,

    /// Print JSON records usable in pipeline files
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_category(s: &str) -> Result<ModelCategory, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct ModelRecord {
    category_tag: i32,
    model_tag: i32,
    name: &'static str,
    discrete: bool,
    model: FitModel,
    equation: String,
    params: Vec<String>,
    start_values: Vec<f64>,
}

fn model_tag(kind: ModelKind) -> i32 {
    match kind {
        ModelKind::Basic(m) => m.as_i32(),
        ModelKind::Peak(m) => m.as_i32(),
        ModelKind::Growth(m) => m.as_i32(),
        ModelKind::Distribution(m) => m.as_i32(),
    }
}

fn takes_degree(kind: ModelKind) -> bool {
    match kind {
        ModelKind::Basic(m) => m.has_degree(),
        ModelKind::Peak(_) => true,
        ModelKind::Growth(_) | ModelKind::Distribution(_) => false,
    }
}

fn record(kind: ModelKind, degree: usize) -> Result<ModelRecord, nsl_core::NslError> {
    let degree = match kind {
        // power only has the variants 1 and 2
        ModelKind::Basic(BasicModel::Power) => degree.min(2),
        _ if takes_degree(kind) => degree,
        _ => 1,
    };
    let model = FitModel::new(kind, degree)?;
    Ok(ModelRecord {
        category_tag: kind.category().as_i32(),
        model_tag: model_tag(kind),
        name: kind.name(),
        discrete: matches!(kind, ModelKind::Distribution(m) if m.is_discrete()),
        model,
        equation: model.equation(),
        params: model.param_names(),
        start_values: model.start_values(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();
    let cli = Cli::parse();

    let mut current = None;
    for kind in ModelKind::all() {
        if cli.category.is_some_and(|c| c != kind.category()) {
            continue;
        }
        let rec = record(kind, cli.degree)?;
        if cli.json {
            println!("{}", serde_json::to_string(&rec)?);
            continue;
        }
        if current != Some(kind.category()) {
            current = Some(kind.category());
            println!("── {} ──", kind.category());
        }
        println!(
            "[{}.{}] {}{}",
            rec.category_tag,
            rec.model_tag,
            rec.name,
            if rec.discrete { " (discrete)" } else { "" }
        );
        println!("    f(x) = {}", rec.equation);
        let params: Vec<String> = rec
            .params
            .iter()
            .zip(&rec.start_values)
            .map(|(n, v)| format!("{n}={v}"))
            .collect();
        println!("    start: {}", params.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsl_fit::{DistributionModel, PeakModel};

    #[test]
    fn test_every_model_has_a_record() {
        for degree in [1, 3] {
            for kind in ModelKind::all() {
                let rec = record(kind, degree).unwrap();
                assert_eq!(rec.params.len(), rec.start_values.len(), "{kind}");
            }
        }
    }

    #[test]
    fn test_degree_only_where_supported() {
        let rec = record(ModelKind::Peak(PeakModel::Gaussian), 2).unwrap();
        assert_eq!(rec.params.len(), 6);
        let rec = record(ModelKind::Distribution(DistributionModel::Poisson), 4).unwrap();
        assert_eq!(rec.model.degree, 1);
        assert!(rec.discrete);
        let rec = record(ModelKind::Basic(BasicModel::Power), 5).unwrap();
        assert_eq!(rec.model.degree, 2);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(parse_category("peak"), Ok(ModelCategory::Peak));
        assert!(parse_category("spline").is_err());
    }
}
