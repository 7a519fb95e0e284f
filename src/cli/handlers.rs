use std::{io::Write, path::Path, time::Instant};

use crate::{
    core::{
        color::{AnsiCode, NAMED_COLORS, TABLEAU10, colorize, parse_palette},
        config::FigureSpec,
        error::GraphError,
        load::{load_records, resolve_resource},
        record::{Record, Scalar},
        reshape::{MatchMode, Reshaped, reshape_with},
        rng::Lcg,
    },
    render::{Renderer, build_figure},
};

use super::parse::{DemoArgs, FigureArgs, PlotArgs, ReshapeArgs, SourceArgs};

fn load_and_reshape(src: &SourceArgs) -> Result<Reshaped, GraphError> {
    let t_ingest = Instant::now();
    let resource = resolve_resource(Path::new(&src.data_dir), &src.resource);
    let wide = load_records(&resource)?;
    let long = reshape_with(&wide, &src.variable, src.match_mode.into());
    if long.dropped > 0 {
        tracing::warn!(
            dropped = long.dropped,
            variable = %src.variable,
            "records without any `<variable> <direction>` field were dropped"
        );
    }
    tracing::debug!(
        %resource,
        wide = wide.len(),
        long = long.records.len(),
        micros = t_ingest.elapsed().as_micros() as u64,
        "ingest + reshape"
    );
    Ok(long)
}

fn figure_spec(a: &FigureArgs, y: &str) -> Result<FigureSpec, GraphError> {
    let mut b = FigureSpec::builder(&a.x, y)
        .facet(&a.facet)
        .title_opt(a.title.as_deref())
        .subtitle_opt(a.subtitle.as_deref())
        .y_domain(a.y_min..=a.y_max)
        .grid(!a.no_grid)
        .frame(!a.no_frame)
        .margin(a.margin)
        .color(!a.no_color && std::env::var_os("NO_COLOR").is_none());
    if let Some(fill) = &a.fill {
        b = b.fill(fill);
    }
    if let Some(p) = &a.palette {
        b = b.palette(parse_palette(p)?);
    }
    Ok(b.build()?)
}

fn plot_records(records: &[Record], spec: &FigureSpec) -> Result<(), GraphError> {
    let t_render = Instant::now();
    let fig = build_figure(records, spec)?;
    Renderer::for_terminal().render_stdout(&fig, spec)?;
    tracing::debug!(
        panels = fig.panels.len(),
        micros = t_render.elapsed().as_micros() as u64,
        "render"
    );
    Ok(())
}

pub fn plot(a: &PlotArgs) -> Result<(), GraphError> {
    let spec = figure_spec(&a.figure, &a.source.variable)?;
    let long = load_and_reshape(&a.source)?;
    plot_records(&long.records, &spec)
}

pub fn reshape(a: &ReshapeArgs) -> Result<(), GraphError> {
    let long = load_and_reshape(&a.source)?;
    let mut out = std::io::stdout().lock();
    if a.pretty {
        serde_json::to_writer_pretty(&mut out, &long.records)?;
    } else {
        serde_json::to_writer(&mut out, &long.records)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Wide records shaped like the `rec-gens` data set.
#[must_use]
pub fn synthesize(
    rng: &mut Lcg,
    records: usize,
    generations: usize,
    directions: &[&str],
    variable: &str,
    sigma: f64,
    x_field: &str,
) -> Vec<Record> {
    let generations = generations.max(1);
    (0..records)
        .map(|i| {
            let g = i % generations + 1;
            let mut rec = Record::with_capacity(directions.len() + 1);
            rec.insert(x_field.to_owned(), Scalar::from(g as u64));
            for (d, dir) in directions.iter().enumerate() {
                // centre drifts with generation and direction
                let centre = 0.25 + 0.5 * (g as f64 / generations as f64) * (1.0 - 0.3 * d as f64);
                let v = sigma.mul_add(rng.randn(), centre).clamp(0.0, 1.0);
                rec.insert(format!("{variable} {dir}"), Scalar::from(v));
            }
            rec
        })
        .collect()
}

pub fn demo(a: &DemoArgs) -> Result<(), GraphError> {
    let mut rng = a.seed.map_or_else(Lcg::seed_from_time, Lcg::seed);
    let directions: Vec<&str> = a
        .directions
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    let wide = synthesize(
        &mut rng,
        a.records,
        a.generations,
        &directions,
        &a.variable,
        a.sigma,
        &a.figure.x,
    );
    let long = reshape_with(&wide, &a.variable, MatchMode::default());
    tracing::debug!(wide = wide.len(), long = long.records.len(), "synthesised demo data");

    let mut spec = figure_spec(&a.figure, &a.variable)?;
    if spec.subtitle.is_none() {
        spec.subtitle = Some(format!("{} synthetic records, σ = {}", a.records, a.sigma));
    }
    plot_records(&long.records, &spec)
}

/// Pretty-print the default palette and accepted colour syntax.
pub fn colors() {
    println!("\nDefault fill palette (tableau10):");
    for (i, &(r, g, b)) in TABLEAU10.iter().enumerate() {
        let hex = format!("#{r:02x}{g:02x}{b:02x}");
        println!("  {i}: {}", colorize(&AnsiCode::rgb(r, g, b), &hex));
    }
    println!("\nNamed colours for --palette:");
    for (name, esc) in NAMED_COLORS {
        println!("  {}", colorize(&AnsiCode::Static(esc), name));
    }
    println!("  (or any #RRGGBB, comma-separated)\n");
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "facet-box";
    println!(
        "
Example invocations
-------------------
• Default data set   : {bin} plot                      (reads data/rec-gens.json)
• Another variable   : {bin} plot rec-gens -v \"clumpiness proportion\"
• Explicit file      : {bin} plot runs/merged.json --x \"recipient generations\"
• From stdin         : cat data/rec-gens.json | {bin} plot -
• Loose matching     : {bin} plot --match contains
• Custom colours     : {bin} plot --palette red,#6048c1
• Long JSON only     : {bin} reshape rec-gens --pretty
• Synthetic data     : {bin} demo --records 400 --directions up,down,sideways --seed 7
• Debug logging      : RUST_LOG=facet_box=trace {bin} plot --debug
"
    );
}
