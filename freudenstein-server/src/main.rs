use clap::Parser;
use freudenstein::{CrankRange, GrashofClass, Linkage, Mobility};
use tracing_subscriber::EnvFilter;

mod serve;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about)]
struct Entry {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Start the solver service
    Serve {
        /// Port number
        #[clap(long, default_value_t = 8080)]
        port: u16,
    },
    /// Solve one configuration and print the report as JSON
    Solve {
        /// Ground link length
        a: f64,
        /// Crank link length
        b: f64,
        /// Coupler link length
        c: f64,
        /// Follower link length
        d: f64,
        /// Crank angle in degrees
        theta2: f64,
    },
}

#[derive(serde::Serialize)]
struct Report {
    grashof: GrashofClass,
    mobility: Mobility,
    crank_range: CrankRange,
    theta31: Option<f64>,
    theta32: Option<f64>,
    theta41: Option<f64>,
    theta42: Option<f64>,
}

fn solve(fb: &Linkage, theta2: f64) -> std::io::Result<()> {
    let report = fb
        .solve(theta2)
        .and_then(|pos| {
            Ok(Report {
                grashof: fb.grashof(),
                mobility: fb.mobility(),
                crank_range: fb.crank_range()?,
                theta31: pos.theta3.open,
                theta32: pos.theta3.crossed,
                theta41: pos.theta4.open,
                theta42: pos.theta4.crossed,
            })
        })
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match Entry::parse().cmd {
        Cmd::Serve { port } => serve::serve(port).await,
        Cmd::Solve { a, b, c, d, theta2 } => solve(&Linkage::new(a, b, c, d), theta2),
    }
}
