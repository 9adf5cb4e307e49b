/// Convierte un monto en un texto compacto: "1.23M", "4.50k", "730".
/// Los umbrales exactos (1.000 y 1.000.000) toman el sufijo mayor.
pub fn formatear_valor(valor: f64) -> String {
    if valor >= 1e6 {
        format!("{:.2}M", valor / 1e6)
    } else if valor >= 1e3 {
        format!("{:.2}k", valor / 1e3)
    } else {
        format!("{:.0}", valor)
    }
}

/// Una línea numerada: "{posición} - {descripción} ({valor})"
pub fn formatear_linea(posicion: usize, descripcion: &str, valor: f64) -> String {
    format!("{} - {} ({})", posicion, descripcion, formatear_valor(valor))
}

/// Une los ofensores ya ordenados en un único texto, una línea por ofensor.
/// La numeración empieza en 1 en cada llamada.
pub fn componer_ofensores(ofensores: &[(String, f64)]) -> String {
    ofensores
        .iter()
        .enumerate()
        .map(|(i, (descripcion, valor))| formatear_linea(i + 1, descripcion, *valor))
        .collect::<Vec<_>>()
        .join("\n")
}
