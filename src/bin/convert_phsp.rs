//! Convert AmpGen four-momenta to analysis conventions and print the
//! phase-space point of the resulting D0 → K π π π candidate, together with
//! the six two-body masses computed by direct summation as a cross-check.

use clap::Parser;
use polars::prelude::DataType;
use tracing::info;
use tracing_subscriber::EnvFilter;

use k3pi::convert::{angle_to_pm_pi, at_rest, from_ampgen, D0_MASS_MEV, GEV_TO_MEV};
use k3pi::data::read_csv;
use k3pi::phase_space::{pair_masses, phsp_point};
use k3pi::{K3PiError, K3PiResult, Vec4};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// CSV file with columns px,py,pz,e in GeV and rows K, OS pi1, SS pi, OS pi2
    #[arg(long)]
    input: Option<String>,

    /// Parent mass in MeV
    #[arg(long, default_value_t = D0_MASS_MEV)]
    parent_mass: f64,
}

// An AmpGen-generated reference event, used when no input file is given.
const K_AMPGEN: [f64; 4] = [
    -0.22605460233259722,
    0.37058687639201848,
    -0.046885439376411875,
    0.65905276036464722,
];
const OS_PI1_AMPGEN: [f64; 4] = [
    0.075397408921232992,
    0.24469544143911467,
    0.20952672690121868,
    0.35908482669738223,
];
const SS_PI_AMPGEN: [f64; 4] = [
    0.077068592008170317,
    -0.37319795594150029,
    0.13901274457578858,
    0.42897629362560541,
];
const OS_PI2_AMPGEN: [f64; 4] = [
    0.07358860140319394,
    -0.24208436188963289,
    -0.30165403210059527,
    0.41772611931236503,
];

fn load_event(args: &Args) -> K3PiResult<[Vec4; 4]> {
    let Some(path) = &args.input else {
        info!("no input given; using the bundled AmpGen reference event");
        return Ok([
            from_ampgen(K_AMPGEN),
            from_ampgen(OS_PI1_AMPGEN),
            from_ampgen(SS_PI_AMPGEN),
            from_ampgen(OS_PI2_AMPGEN),
        ]);
    };
    let df = read_csv(path)?;
    if df.height() != 4 {
        return Err(K3PiError::InvalidDecay(format!(
            "expected 4 daughter rows in '{path}', got {}",
            df.height()
        )));
    }
    let component = |name: &str| -> K3PiResult<Vec<f64>> {
        Ok(df
            .column(name)
            .map_err(|_| K3PiError::MissingColumn {
                name: name.to_string(),
            })?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .collect())
    };
    let (px, py, pz, e) = (
        component("px")?,
        component("py")?,
        component("pz")?,
        component("e")?,
    );
    let mut daughters = [Vec4::default(); 4];
    for (i, daughter) in daughters.iter_mut().enumerate() {
        *daughter = from_ampgen([px[i], py[i], pz[i], e[i]]);
    }
    Ok(daughters)
}

fn main() -> K3PiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let [k, os_pi1, ss_pi, os_pi2] = load_event(&args)?;
    let parent = at_rest(args.parent_mass);
    let point = phsp_point(&parent, &k, &os_pi1, &ss_pi, &os_pi2)?;

    println!(
        "phase-space point [GeV, rad in (-pi, pi]] = {{ {}, {}, {}, {}, {} }}",
        point.m12 / GEV_TO_MEV,
        point.m34 / GEV_TO_MEV,
        point.cos12,
        point.cos34,
        angle_to_pm_pi(point.phi)
    );
    println!("phi in [0, 2pi) = {}", point.phi);

    let masses = pair_masses(&[k, os_pi1, ss_pi, os_pi2]);
    let labels = [
        "m(K, OS pi1)",
        "m(K, SS pi)",
        "m(K, OS pi2)",
        "m(OS pi1, SS pi)",
        "m(OS pi1, OS pi2)",
        "m(SS pi, OS pi2)",
    ];
    for (label, mass) in labels.iter().zip(masses.iter()) {
        println!("{label} = {} GeV", mass / GEV_TO_MEV);
    }
    Ok(())
}
