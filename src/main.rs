use artifact_extractor::{
    ArtifactExtractor, Cli, ExtractorError, OutputFormatter, OutputMode, UserFriendlyError,
    COMPLETION_MESSAGE,
};
use clap::Parser;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let extractor = match ArtifactExtractor::from_cli(&cli) {
        Ok(extractor) => extractor,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let result = if cli.dry_run {
        extractor.dry_run()
    } else {
        extractor.extract()
    };

    match result {
        Ok(report) => {
            let formatter = extractor.output_formatter();
            if extractor.config().output.show_summary || formatter.mode() == OutputMode::Json {
                formatter.print_extraction_report(&report);
            }
            if !report.dry_run {
                formatter.success(COMPLETION_MESSAGE);
            }
            0
        }
        Err(e) => {
            extractor.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ExtractorError) -> i32 {
    match error {
        ExtractorError::Config { .. } => 2,
        ExtractorError::SourceRead { .. } => 3,
        ExtractorError::SourceEncoding { .. } => 4,
        ExtractorError::CreateDirectory { .. } | ExtractorError::WriteFile { .. } => 5,
        ExtractorError::Io(_) => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "artifact-extractor.toml".to_string());

    match ArtifactExtractor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  artifact-extractor --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ExtractorError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
