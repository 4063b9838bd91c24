/**
 * GraphReco
 * Copyright (C) 2026 The GraphReco developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

#[macro_use]
extern crate log;

use std::env;
use std::process;

use getopts::Options;

use graphreco::io;
use graphreco::metrics;
use graphreco::ranking;
use graphreco::stats::DataDictionary;
use graphreco::{EmptyGroundTruth, EvaluationConfig, Result};

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("t", "truth", "Ground truth file (required). The file must contain a user and a \
        relevant item per line, separated by a tab.", "PATH");
    opts.optopt("r", "recommendations", "Recommendations file (required). The file must contain a \
        user and a recommended item per line, separated by a tab, in rank order.", "PATH");
    opts.optopt("c", "config", "Evaluation settings as JSON (optional).", "PATH");
    opts.optopt("k", "cutoff", "Number of top recommendations to evaluate (optional, overrides \
        the config, defaults to 20).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optflag("z", "empty-as-zero", "Users without relevant items count with a recall of zero \
        instead of aborting the evaluation.");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    let (truth_path, recommendations_path) =
        match (matches.opt_str("t"), matches.opt_str("r")) {
            (Some(truth_path), Some(recommendations_path)) => (truth_path, recommendations_path),
            _ => {
                return print_usage_and_exit(
                    &program,
                    opts,
                    Some("Please specify both --truth and --recommendations."),
                )
            },
        };

    let mut config = match matches.opt_str("c") {
        Some(config_path) => match EvaluationConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(failure) => {
                let hint = format!("Problem with the config file: {}", failure);
                return print_usage_and_exit(&program, opts, Some(&hint))
            },
        },
        None => EvaluationConfig::default(),
    };

    match matches.opt_get_default("k", config.k) {
        Ok(k) if k > 0 => config.k = k,
        Ok(_) => {
            return print_usage_and_exit(&program, opts, Some("Option 'k' must be positive."))
        },
        Err(failure) => {
            let hint = format!("Problem with option 'k': {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    }

    if matches.opt_present("z") {
        config.empty_ground_truth = EmptyGroundTruth::CountAsZero;
    }

    let output_path = matches.opt_str("o");

    if let Err(failure) = evaluate(&truth_path, &recommendations_path, &config, output_path) {
        error!("Evaluation failed: {}", failure);
        process::exit(1);
    }
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
    process::exit(2);
}

fn evaluate(
    truth_path: &str,
    recommendations_path: &str,
    config: &EvaluationConfig,
    output_path: Option<String>,
) -> Result<()> {

    info!("Reading ground truth from {}", truth_path);

    let mut data_dict = DataDictionary::default();
    let mut ground_truth = io::read_item_lists(truth_path, &mut data_dict)?;

    info!("Reading recommendations from {}", recommendations_path);
    let recommendations = io::read_item_lists(recommendations_path, &mut data_dict)?;

    // Users which only appear in the recommendations have nothing relevant
    ground_truth.resize(data_dict.num_users(), Vec::new());

    info!("Found {} users and {} items, evaluating at k = {}",
        data_dict.num_users(), data_dict.num_items(), config.k);

    let relevance = ranking::relevance_matrix(&recommendations, &ground_truth, config.k)?;
    let evaluation =
        metrics::evaluate(&ground_truth, relevance.view(), config.k, config.empty_ground_truth)?;

    io::write_evaluation(&evaluation, output_path)
}
