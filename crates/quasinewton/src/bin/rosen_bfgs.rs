use clap::{Parser, ValueEnum};
use quasinewton::prelude::*;
use quasinewton::DEFAULT_START;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "rosen_bfgs",
    about = "Minimize the Rosenbrock function (or a small least-squares problem) with BFGS"
)]
struct Cli {
    /// Objective to minimize
    #[arg(long, value_enum, default_value_t = ProblemChoice::Rosenbrock)]
    problem: ProblemChoice,

    /// Quasi-Newton method
    #[arg(long, value_enum, default_value_t = MethodChoice::Bfgs)]
    method: MethodChoice,

    /// Gradient norm tolerance
    #[arg(long, default_value_t = 1e-2)]
    tol: f64,

    /// Starting point as a comma-separated list (defaults to the problem's standard start)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    x0: Option<Vec<f64>>,

    /// Start from a uniformly random point in [-2, 2]^dim
    #[arg(long, conflicts_with = "x0")]
    random_start: bool,

    /// Dimension of the random starting point
    #[arg(long, default_value_t = 5, requires = "random_start")]
    dim: usize,

    /// Seed for the random starting point
    #[arg(long, requires = "random_start")]
    seed: Option<u64>,

    /// Maximum number of iterations
    #[arg(long)]
    max_iter: Option<usize>,

    /// Do not print the progress table and summary
    #[arg(long)]
    quiet: bool,

    /// Log every point at which the gradient is evaluated
    #[arg(long)]
    trace_points: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ProblemChoice {
    Rosenbrock,
    LeastSquares,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodChoice {
    Bfgs,
    Lbfgs,
}

impl From<MethodChoice> for Method {
    fn from(choice: MethodChoice) -> Self {
        match choice {
            MethodChoice::Bfgs => Method::Bfgs,
            MethodChoice::Lbfgs => Method::LBfgs,
        }
    }
}

/// Logs each point at which the wrapped objective's gradient is evaluated.
#[derive(Debug)]
struct TracePoints<C> {
    inner: C,
}

impl<C: CostFunction<f64>> CostFunction<f64> for TracePoints<C> {
    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }

    fn cost(&self, point: &DVector<f64>) -> quasinewton::quasinewton_core::Result<f64> {
        self.inner.cost(point)
    }

    fn cost_and_gradient(
        &self,
        point: &DVector<f64>,
    ) -> quasinewton::quasinewton_core::Result<(f64, DVector<f64>)> {
        log::info!("x = {}", format_point(point));
        self.inner.cost_and_gradient(point)
    }

    fn gradient(
        &self,
        point: &DVector<f64>,
    ) -> quasinewton::quasinewton_core::Result<DVector<f64>> {
        log::info!("x = {}", format_point(point));
        self.inner.gradient(point)
    }
}

fn format_point(point: &DVector<f64>) -> String {
    let parts: Vec<String> = point.iter().map(|v| format!("{v:.8}")).collect();
    format!("[{}]", parts.join(", "))
}

fn random_point(dim: usize, seed: Option<u64>) -> DVector<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    DVector::from_fn(dim, |_, _| rng.gen_range(-2.0..2.0))
}

fn starting_point(args: &Cli) -> DVector<f64> {
    if let Some(x0) = &args.x0 {
        return DVector::from_vec(x0.clone());
    }
    if args.random_start {
        return random_point(args.dim, args.seed);
    }
    match args.problem {
        ProblemChoice::Rosenbrock => DVector::from_row_slice(&DEFAULT_START),
        ProblemChoice::LeastSquares => DVector::from_vec(vec![9.2, 6.3, 0.0]),
    }
}

fn run<C: CostFunction<f64>>(
    cost_fn: C,
    x0: &DVector<f64>,
    method: Method,
    options: &MinimizeOptions<f64>,
    trace: bool,
) -> OptimizerResult<OptimizationResult<f64>> {
    if trace {
        minimize(&TracePoints { inner: cost_fn }, x0, method, options)
    } else {
        minimize(&cost_fn, x0, method, options)
    }
}

fn main() {
    let args = Cli::parse();

    let default_level = if args.trace_points { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if !(args.tol > 0.0) {
        eprintln!("Error: --tol must be positive, got {}.", args.tol);
        process::exit(2);
    }

    let x0 = starting_point(&args);
    let method = Method::from(args.method);
    let options = MinimizeOptions::new()
        .with_tol(args.tol)
        .with_display(!args.quiet)
        .with_max_iterations(args.max_iter.or(Some(1000)));

    log::debug!(
        "{} on {:?} from {} (tol {})",
        method.name(),
        args.problem,
        format_point(&x0),
        args.tol
    );

    let outcome = match args.problem {
        ProblemChoice::Rosenbrock => match Rosenbrock::new(x0.len()) {
            Ok(rosen) => run(rosen, &x0, method, &options, args.trace_points),
            Err(e) => Err(e.into()),
        },
        ProblemChoice::LeastSquares => match LinearLeastSquares::synthetic(10, 3) {
            Ok(problem) => run(problem, &x0, method, &options, args.trace_points),
            Err(e) => Err(e.into()),
        },
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: optimization failed: {e}");
            process::exit(2);
        }
    };

    if !args.quiet {
        println!("x = {}", format_point(&result.point));
    }
    if !result.converged {
        process::exit(1);
    }
}
