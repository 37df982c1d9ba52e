mod cli;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Report;
use color_eyre::Section;
use cursepack_install::Installer;
use cursepack_repository::CurseforgeRepository;

use crate::cli::Options;

fn main() -> Result<ExitCode, Report> {
    let options = Options::parse();
    color_eyre::install()?;
    install_tracing()?;

    let installer = Installer::new(CurseforgeRepository::new());
    let report = installer
        .install(&options.archive_path, &options.output_path)
        .map_err(enrich)?;

    if !report.is_complete() {
        tracing::warn!(
            downloaded = report.downloaded,
            total = report.total,
            "Some mods were not downloaded",
        );
        eprintln!(
            "Downloaded {downloaded} mods out of {total}. The bundle artifacts were \
             left in {output:?} so the run can be retried.",
            downloaded = report.downloaded,
            total = report.total,
            output = options.output_path,
        );
        // The reference tool exits 0 here. We don't, so scripts can tell a
        // complete install from a partial one.
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "Installed {name} {version}. You can now move the contents of {output:?} \
         into your Minecraft folder.",
        name = report.pack_name,
        version = report.pack_version,
        output = options.output_path,
    );
    match report.loader_id {
        Some(loader) => println!("Don't forget to install the required modloader: {loader}"),
        None => println!("The manifest does not name a required modloader."),
    }

    Ok(ExitCode::SUCCESS)
}

/// Attaches user-facing context to the fatal installation errors.
fn enrich(error: cursepack_install::Error) -> Report {
    use cursepack_install::Error;
    let report = Report::new(error);
    match report.downcast_ref::<Error>() {
        Some(Error::Manifest(_)) => report
            .with_note(|| "The bundle did not yield a readable manifest.json.")
            .with_suggestion(|| {
                "Make sure the archive is a CurseForge modpack bundle, not a plain mod jar."
            }),
        Some(Error::Io { .. }) => report
            .with_note(|| "Cursepack encountered an I/O error.")
            .with_suggestion(|| "Check the output path and your permissions on it."),
        Some(Error::Zip(_)) | None => report,
    }
}

fn install_tracing() -> Result<(), Report> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};
    let format_layer = fmt::layer().pretty().without_time().with_writer(io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
