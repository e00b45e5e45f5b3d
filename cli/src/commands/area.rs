use anyhow::{Context, Result};
use regionmap::geom::coordinates_from_json;
use regionmap::import::parse_vector_payload;
use regionmap::{planar_area, spherical_area, LatLng};

use crate::cli::{AreaArgs, Cli};

pub fn run(cli: &Cli, args: &AreaArgs) -> Result<()> {
    let limit = super::load_config(cli)?.area_limit();
    let file_name = args.file.to_string_lossy();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let rings: Vec<(String, Vec<LatLng>)> = if file_name.to_ascii_lowercase().ends_with(".json") {
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {} as JSON", args.file.display()))?;
        vec![(regionmap::import::base_name(&file_name), coordinates_from_json(&value))]
    } else {
        parse_vector_payload(&bytes, &file_name)?.into_iter()
            .map(|shape| (shape.name, shape.coordinates))
            .collect()
    };

    for (name, ring) in rings {
        let planar = planar_area(&ring);
        let gauge = limit.gauge(planar);
        println!(
            "{name}: {} points, planar {planar:.2} km², spherical {:.2} km², {:.0}% of limit{}",
            ring.len(),
            spherical_area(&ring),
            gauge.percent,
            if gauge.over_limit { " (over limit)" } else { "" },
        );
    }

    Ok(())
}
