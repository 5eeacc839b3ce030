use crane3d::*;

fn main() -> Result<(), CraneError> {
    let rail_force = 0.0;
    let cart_force = 0.0;
    let line_force = 0.0;

    let mut model = CraneModel::new();
    model.params.formulation = FormulationKind::Linear;

    let state = model.update(1.0, rail_force, cart_force, line_force)?;
    println!("{state}");
    Ok(())
}
