use figgen::types::{Color, FigError, Figure, Spine};

fn main() -> Result<(), FigError> {
    env_logger::init();
    let sky = Color::new(135, 207, 235);
    let black = Color::splat(0);
    let mut fig = Figure::new(3.0, 2.25);
    for side in [Spine::Top, Spine::Right, Spine::Bottom, Spine::Left] {
        fig.set_spine(side, false);
    }
    fig.set_xlim(-0.5, 3.5);
    fig.set_ylim(-0.5, 2.5);
    fig.fill_between(&[-0.5, 1.5], &[0.5, 2.5], &[-0.5, -0.5], sky)?;
    fig.fill_between(&[1.5, 1.75], &[2.5, 2.5], &[-0.5, -0.5], sky)?;
    fig.fill_between(&[1.75, 3.25], &[2.5, -0.5], &[-0.5, -0.5], sky)?;
    fig.line(&[-0.5, 1.5], &[0.5, 2.5], 1.0, black)?;
    fig.line(&[1.75, 3.25], &[2.5, -0.5], 1.0, black)?;
    fig.set_xlabel("x");
    fig.set_ylabel("y");
    fig.set_xticks(&[0.0, 1.0, 2.0, 3.0]);
    fig.set_yticks(&[0.0, 1.0, 2.0]);
    fig.set_grid(Color::splat(128).alpha(64));
    fig.save("fig2-2-constraint-2.png")
}
