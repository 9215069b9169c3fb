use lift_core::capacity::{evaluate_capacity_with, LiftRequest};
use lift_core::equipment::{CraneRegistry, MultiCraneLift};
use lift_core::na;
use lift_core::route::{rank_routes, Hazard, HazardType, RouteOption, RoutePath, Severity};
use lift_core::types::*;
use lift_core::PlannerConfig;

const REGISTRY_CSV: &str = "\
manufacturer,model,crane_type,rated_capacity_t,max_radius_m,max_height_m
Liebherr,LTM 1100-5.2,all-terrain,100,40,58
Liebherr,LTM 1060-3.1,all-terrain,60,48,52
Tadano,GR-1000XL,rough-terrain,100,48,61
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = PlannerConfig::default();

    let mut registry = CraneRegistry::new();
    registry.load_csv(REGISTRY_CSV.as_bytes())?;
    println!("Loaded {} crane models", registry.len());

    // Single lift
    let envelope = registry.envelope("Liebherr", "LTM 1100-5.2")?;
    let request = LiftRequest::metric(20.0, 0.0, 50.0);
    let result = evaluate_capacity_with(&config.derating, &envelope, &request);
    println!("LTM 1100 at 20 m: {}", result.summary());

    // Same load shared with a second crane
    let mut tandem = MultiCraneLift::new(Mass::new::<megagram>(50.0));
    tandem
        .add_crane("LTM 1100", envelope, Length::new::<meter>(20.0), Length::new::<meter>(0.0))
        .add_crane(
            "GR-1000XL",
            registry.envelope("Tadano", "GR-1000XL")?,
            Length::new::<meter>(12.0),
            Length::new::<meter>(0.0),
        );
    let analysis = tandem.evaluate_with(&config.derating);
    println!(
        "Tandem: total capacity {}, safe: {}",
        DisplayMass(analysis.total_capacity),
        analysis.is_safe
    );
    for crane in &analysis.cranes {
        println!(
            "  {}: share {} ({:.1}% utilised)",
            crane.label,
            DisplayMass(crane.load_share),
            crane.utilization_pct.unwrap_or(0.0)
        );
    }

    // Route options for a 4.5 m high load
    let vehicle_height = Length::new::<meter>(4.5);
    let direct = RouteOption::assess(
        "Direct",
        RoutePath::new(vec![na::Point2::new(0.0, 0.0), na::Point2::new(12_000.0, 0.0)]),
        vec![
            Hazard::new(HazardType::Bridge, Severity::Safe)
                .with_clearance(Length::new::<meter>(4.2))
                .with_chainage(Length::new::<meter>(3_400.0))
                .with_description("Rail overbridge"),
            Hazard::new(HazardType::Roundabout, Severity::Caution)
                .with_chainage(Length::new::<meter>(900.0)),
        ],
        vehicle_height,
        &config.scoring,
    );
    let bypass = RouteOption::assess(
        "Bypass",
        RoutePath::new(vec![
            na::Point2::new(0.0, 0.0),
            na::Point2::new(6_000.0, 4_000.0),
            na::Point2::new(12_000.0, 0.0),
        ]),
        vec![Hazard::new(HazardType::PowerLine, Severity::Safe)
            .with_clearance(Length::new::<meter>(4.8))
            .with_chainage(Length::new::<meter>(5_100.0))],
        vehicle_height,
        &config.scoring,
    );

    let mut options = vec![direct, bypass];
    rank_routes(&mut options);
    for option in &options {
        println!("{}", option.summary());
        if let Some(blocker) = option.first_blocking_hazard() {
            println!("  blocked by {} ({})", blocker.hazard_type, blocker.description);
        }
    }

    Ok(())
}
