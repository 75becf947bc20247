use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use seatplan_engine::schema::{SeatingRequest, SeatingResponse};
use seatplan_optimizer::SeatingSolver;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Seating request JSON file
    request: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SolveArg, solver: SeatingSolver) -> anyhow::Result<()> {
    let SolveArg { request, output } = arg;
    let response = solve_file(request, solver)?;
    match output {
        Some(path) => save_response(&response, path)?,
        None => write_response(io::stdout().lock(), &response)
            .context("Failed to write seating to stdout")?,
    }
    Ok(())
}

fn solve_file(path: &Path, solver: SeatingSolver) -> anyhow::Result<SeatingResponse> {
    let request = read_request(path)?;
    solver
        .solve(&request)
        .with_context(|| format!("Invalid input or no solution found for {}", path.display()))
}

fn read_request(path: &Path) -> anyhow::Result<SeatingRequest> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open seating request: {}", path.display()))?;
    let request: SeatingRequest = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse seating request: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        students = request.students.len(),
        "loaded seating request"
    );
    Ok(request)
}

fn save_response(response: &SeatingResponse, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_response(BufWriter::new(file), response)
        .with_context(|| format!("Failed to write seating to {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        fitness = response.fitness,
        "saved seating"
    );
    Ok(())
}

/// Writes `response` as pretty JSON followed by a newline.
fn write_response<W>(mut writer: W, response: &SeatingResponse) -> io::Result<()>
where
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()
}
