use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / results.len() as f64) * 100.0;
    rate
}

pub fn generate_console_report(
    w: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "📊 Studio Logic Results Summary".bright_cyan().bold())?;
    writeln!(w, "{}", "===============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(w, "Total runs: {total}")?;
    writeln!(w, "Passed: {}", passed.to_string().green())?;
    writeln!(w, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(w, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(w, "Total time: {total_duration:?}")?;
    writeln!(w)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            w,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            w,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(w, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(w, "   Failures:")?;
            for failure in &result.failures {
                writeln!(w, "     • {}", failure.red())?;
            }
        }
        writeln!(w)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(w, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(w, "{}", "=====================".yellow())?;
        writeln!(
            w,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            w,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(w: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, results)?;
    writeln!(w)?;
    Ok(())
}

pub fn generate_markdown_report(w: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(w, "# Sparkle Studio Logic Test Results\n")?;
    writeln!(
        w,
        "_Generated {}_\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(w, "## Summary\n")?;
    writeln!(w, "- **Total runs**: {total}")?;
    writeln!(w, "- **Passed**: {passed}")?;
    writeln!(w, "- **Failed**: {}", total - passed)?;
    writeln!(w, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(w, "## Detailed Results\n")?;
    writeln!(w, "| Scenario | Seed | Status | Iterations | Average time |")?;
    writeln!(w, "|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            w,
            "| {} | {} | {} | {}/{} | {:?} |",
            result.scenario_name,
            result.seed,
            status,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }

    let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        writeln!(w, "\n## Failures\n")?;
        for result in failed {
            writeln!(w, "### {} (seed {})\n", result.scenario_name, result.seed)?;
            for failure in &result.failures {
                writeln!(w, "- {failure}")?;
            }
            writeln!(w)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool, millis: u64) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            seed: 1337,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (seed 1338): welcome should be worth 8, got 0".to_string()]
            },
            average_duration: Duration::from_millis(millis),
            performance_data: vec![Duration::from_millis(millis)],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_report_lists_failures_and_extremes() {
        colored::control::set_override(false);
        let results = [result("smoke", true, 1), result("reset", false, 9)];
        let text = render(|w| generate_console_report(w, &results, Duration::from_millis(10)));
        assert!(text.contains("Total runs: 2"));
        assert!(text.contains("Success rate: 50.0%"));
        assert!(text.contains("❌ FAIL reset (seed 1337)"));
        assert!(text.contains("welcome should be worth 8"));
        assert!(text.contains("Fastest: smoke"));
        assert!(text.contains("Slowest: reset"));
    }

    #[test]
    fn json_report_is_parseable() {
        let results = [result("smoke", true, 3)];
        let text = render(|w| generate_json_report(w, &results));
        let parsed: Vec<ScenarioResult> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].passed);
        assert_eq!(parsed[0].average_duration, Duration::from_millis(3));
    }

    #[test]
    fn markdown_report_has_table_and_failure_section() {
        let results = [result("smoke", true, 1), result("persistence", false, 2)];
        let text = render(|w| generate_markdown_report(w, &results));
        assert!(text.starts_with("# Sparkle Studio Logic Test Results"));
        assert!(text.contains("| smoke | 1337 | ✅ | 2/2 |"));
        assert!(text.contains("### persistence (seed 1337)"));

        let clean = render(|w| generate_markdown_report(w, &results[..1]));
        assert!(!clean.contains("## Failures"));
    }
}
