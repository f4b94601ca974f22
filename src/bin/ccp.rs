//! Demo CLI driver. Kept outside the core library; the library never
//! depends on this binary or on `structopt`/`pretty_env_logger`'s console
//! output.

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "ccp", about = "Solve the generalized chicken-crossing puzzle via SAT")]
struct Opt {
    /// Crossing duration for each chicken, e.g. `1 3 6 8`.
    #[structopt(required = true)]
    durations: Vec<u32>,

    /// Boat capacity.
    #[structopt(short, long)]
    capacity: i64,

    /// Time budget. If omitted, the minimal feasible budget is found first.
    #[structopt(short, long)]
    t_budget: Option<i64>,
}

fn main() {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    let t_budget = opt
        .t_budget
        .unwrap_or_else(|| ccp::find_duration(&opt.durations, opt.capacity) as i64);

    match ccp::gen_solution(&opt.durations, opt.capacity, t_budget) {
        Some(schedule) => {
            println!("feasible with T={t_budget}");
            for (t, passengers) in schedule {
                println!("  t={t}: {passengers:?}");
            }
        }
        None => println!("no solution for T={t_budget}"),
    }
}
