use figgen::types::{Color, FigError, Figure, Path, PathCode, Spine};

fn main() -> Result<(), FigError> {
    env_logger::init();
    let verts = [
        (0.0, 0.0),
        (0.0, 1.0),
        (1.0, 2.0),
        (2.0, 2.0),
        (2.0, 2.0),
        (3.0, 0.0),
        (0.0, 0.0),
    ];
    let codes = [
        PathCode::MoveTo,
        PathCode::LineTo,
        PathCode::LineTo,
        PathCode::LineTo,
        PathCode::LineTo,
        PathCode::LineTo,
        PathCode::ClosePoly,
    ];
    let feasible = Path::new(&verts, &codes)?;
    let sky = Color::new(135, 207, 235);
    let mut fig = Figure::new(3.0, 2.25);
    for side in [Spine::Top, Spine::Right, Spine::Bottom, Spine::Left] {
        fig.set_spine(side, false);
    }
    fig.set_xlim(-0.5, 3.5);
    fig.set_ylim(-0.5, 2.5);
    fig.add_patch(feasible, sky, Color::splat(0), 1.0);
    fig.line(&[-0.5, 1.5], &[1.5, -0.5], 1.0, Color::new(255, 0, 0))?;
    fig.set_xlabel("x");
    fig.set_ylabel("y");
    fig.set_xticks(&[0.0, 1.0, 2.0, 3.0]);
    fig.set_yticks(&[0.0, 1.0, 2.0]);
    fig.set_grid(Color::splat(128).alpha(64));
    fig.save("fig2-5-isoprofit-line.png")
}
