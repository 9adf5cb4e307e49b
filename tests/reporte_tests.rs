use glosas::models::{ConfigReporte, TablaGlosas, Valor};
use glosas::{construir_reporte, GlosaError};

const COLS_INICIAL: [&str; 5] = ["Marca", "Operadora", "Motivo Operadora (Código)", "Glosa Inicial", "Desc. Proced. DCM"];

fn tabla_inicial(filas: &[(&str, &str, &str, f64, &str)]) -> TablaGlosas {
    TablaGlosas::new(
        COLS_INICIAL.iter().map(|c| c.to_string()).collect(),
        filas
            .iter()
            .map(|(m, o, c, v, d)| vec![Valor::texto(*m), Valor::texto(*o), Valor::texto(*c), Valor::Numero(*v), Valor::texto(*d)])
            .collect(),
    )
}

#[test]
fn escenario_basico_dos_operadoras() {
    let tabla = tabla_inicial(&[
        ("A", "X", "C1", 100.0, "p1"),
        ("A", "X", "C1", 50.0, "p2"),
        ("A", "X", "C2", 10.0, "p3"),
        ("A", "Y", "C1", 5.0, "p4"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();

    let claves: Vec<(&str, &str, &str, f64)> = filas
        .iter()
        .map(|f| (f.marca.as_str(), f.operadora.as_str(), f.codigo.as_str(), f.valor_glosado))
        .collect();
    assert_eq!(claves, vec![("A", "X", "C1", 150.0), ("A", "X", "C2", 10.0), ("A", "Y", "C1", 5.0)]);
    assert_eq!(filas[0].ofensores, "1 - p1 (100)\n2 - p2 (50)");
    assert_eq!(filas[1].ofensores, "1 - p3 (10)");
    assert_eq!(filas[2].ofensores, "1 - p4 (5)");
}

#[test]
fn marcas_en_orden_ascendente_aunque_sumen_menos() {
    let tabla = tabla_inicial(&[
        ("Zeta", "X", "C1", 1_000_000.0, "p1"),
        ("Alfa", "X", "C1", 1.0, "p1"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    let marcas: Vec<&str> = filas.iter().map(|f| f.marca.as_str()).collect();
    assert_eq!(marcas, vec!["Alfa", "Zeta"]);
}

#[test]
fn montos_grandes_usan_sufijos() {
    let tabla = tabla_inicial(&[
        ("A", "X", "C1", 1_200_000.0, "Consulta"),
        ("A", "X", "C1", 300_000.0, "Consulta"),
        ("A", "X", "C1", 2_500.0, "Exame"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 1);
    assert_eq!(filas[0].valor_glosado, 1_502_500.0);
    assert_eq!(filas[0].ofensores, "1 - Consulta (1.50M)\n2 - Exame (2.50k)");
}

#[test]
fn limites_de_codigos_y_ofensores() {
    let mut datos: Vec<(String, f64, String)> = Vec::new();
    for c in 0..12 {
        for p in 0..9 {
            datos.push((format!("C{:02}", c), (c * 100 + p) as f64, format!("proc{}", p)));
        }
    }
    let filas_ref: Vec<(&str, &str, &str, f64, &str)> =
        datos.iter().map(|(c, v, p)| ("A", "X", c.as_str(), *v, p.as_str())).collect();
    let filas = construir_reporte(&tabla_inicial(&filas_ref), &ConfigReporte::glosa_inicial()).unwrap();

    assert_eq!(filas.len(), 8);
    assert_eq!(filas[0].codigo, "C11");
    assert_eq!(filas[7].codigo, "C04");
    for f in &filas {
        let lineas: Vec<&str> = f.ofensores.lines().collect();
        assert_eq!(lineas.len(), 5);
        assert!(lineas[0].starts_with("1 - proc8 ("));
        assert!(lineas[4].starts_with("5 - proc4 ("));
    }
}

#[test]
fn limites_configurables() {
    let tabla = tabla_inicial(&[
        ("A", "X", "C1", 3.0, "p1"),
        ("A", "X", "C1", 2.0, "p2"),
        ("A", "X", "C2", 1.0, "p3"),
    ]);
    let mut cfg = ConfigReporte::glosa_inicial();
    cfg.top_codigos = 1;
    cfg.top_detalles = 1;
    let filas = construir_reporte(&tabla, &cfg).unwrap();
    assert_eq!(filas.len(), 1);
    assert_eq!(filas[0].valor_glosado, 5.0);
    assert_eq!(filas[0].ofensores, "1 - p1 (3)");
}

#[test]
fn falta_codigo_da_columnas_faltantes() {
    let tabla = TablaGlosas::new(
        vec!["Marca".into(), "Operadora".into(), "Glosa Inicial".into(), "Desc. Proced. DCM".into()],
        vec![vec![Valor::texto("A"), Valor::texto("X"), Valor::Numero(1.0), Valor::texto("p")]],
    );
    match construir_reporte(&tabla, &ConfigReporte::glosa_inicial()) {
        Err(GlosaError::ColumnasFaltantes(f)) => assert_eq!(f, vec!["Motivo Operadora (Código)".to_string()]),
        other => panic!("esperaba ColumnasFaltantes, obtuve {:?}", other),
    }
}

#[test]
fn variante_aceita_usa_sus_columnas() {
    let cfg = ConfigReporte::glosa_aceita();
    let tabla = TablaGlosas::new(
        cfg.columnas_requeridas().iter().map(|c| c.to_string()).collect(),
        vec![
            vec![Valor::texto("B"), Valor::texto("Op"), Valor::Numero(1901.0), Valor::Numero(40.0), Valor::texto("Raio X")],
            vec![Valor::texto("B"), Valor::texto("Op"), Valor::Numero(1901.0), Valor::texto("2"), Valor::texto("Raio X")],
        ],
    );
    let filas = construir_reporte(&tabla, &cfg).unwrap();
    assert_eq!(filas.len(), 1);
    assert_eq!(filas[0].codigo, "1901");
    assert_eq!(filas[0].valor_glosado, 42.0);
    assert_eq!(filas[0].ofensores, "1 - Raio X (42)");

    // las columnas de la otra variante no sirven
    assert!(matches!(
        construir_reporte(&tabla, &ConfigReporte::glosa_inicial()),
        Err(GlosaError::ColumnasFaltantes(_))
    ));
}

#[test]
fn descripcion_vacia_suma_al_total_pero_no_es_ofensor() {
    let cfg = ConfigReporte::glosa_inicial();
    let tabla = TablaGlosas::new(
        COLS_INICIAL.iter().map(|c| c.to_string()).collect(),
        vec![
            vec![Valor::texto("A"), Valor::texto("X"), Valor::texto("C1"), Valor::Numero(70.0), Valor::Vacio],
            vec![Valor::texto("A"), Valor::texto("X"), Valor::texto("C1"), Valor::Numero(30.0), Valor::texto("p")],
        ],
    );
    let filas = construir_reporte(&tabla, &cfg).unwrap();
    assert_eq!(filas[0].valor_glosado, 100.0);
    assert_eq!(filas[0].ofensores, "1 - p (30)");
}

#[test]
fn valores_con_comillas_no_rompen_los_grupos() {
    let tabla = tabla_inicial(&[
        ("D'Or", "Sul \"América\"", "C'1", 10.0, "p'1"),
        ("D'Or", "Sul \"América\"", "C'1", 5.0, "p'1"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 1);
    assert_eq!(filas[0].valor_glosado, 15.0);
    assert_eq!(filas[0].ofensores, "1 - p'1 (15)");
}

#[test]
fn ejecutar_dos_veces_da_lo_mismo() {
    let tabla = tabla_inicial(&[
        ("A", "X", "C1", 0.1, "p1"),
        ("A", "X", "C1", 0.2, "p2"),
        ("B", "Y", "C3", 7.0, "p1"),
        ("A", "Y", "C2", 7.0, "p9"),
    ]);
    let cfg = ConfigReporte::glosa_inicial();
    let a = construir_reporte(&tabla, &cfg).unwrap();
    let b = construir_reporte(&tabla, &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn variantes_en_paralelo_son_independientes() {
    let inicial = tabla_inicial(&[("A", "X", "C1", 1.0, "p1")]);
    let cfg_aceita = ConfigReporte::glosa_aceita();
    let aceita = TablaGlosas::new(
        cfg_aceita.columnas_requeridas().iter().map(|c| c.to_string()).collect(),
        vec![vec![Valor::texto("B"), Valor::texto("Y"), Valor::texto("C2"), Valor::Numero(2.0), Valor::texto("p2")]],
    );

    let (r1, r2) = std::thread::scope(|s| {
        let h1 = s.spawn(|| construir_reporte(&inicial, &ConfigReporte::glosa_inicial()));
        let h2 = s.spawn(|| construir_reporte(&aceita, &cfg_aceita));
        (h1.join().unwrap(), h2.join().unwrap())
    });
    assert_eq!(r1.unwrap()[0].marca, "A");
    assert_eq!(r2.unwrap()[0].marca, "B");
}

fn tabla_texto(filas: &[(&str, &str, &str, &str, &str)]) -> TablaGlosas {
    TablaGlosas::new(
        COLS_INICIAL.iter().map(|c| c.to_string()).collect(),
        filas
            .iter()
            .map(|(m, o, c, v, d)| vec![Valor::texto(*m), Valor::texto(*o), Valor::texto(*c), Valor::texto(*v), Valor::texto(*d)])
            .collect(),
    )
}

#[test]
fn montos_nan_se_tratan_como_faltantes() {
    let tabla = tabla_texto(&[
        ("A", "X", "C1", "100", "p1"),
        ("A", "X", "C1", "NaN", "p2"),
        ("A", "X", "C2", "50", "p3"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 2);
    assert_eq!((filas[0].codigo.as_str(), filas[0].valor_glosado), ("C1", 100.0));
    assert_eq!(filas[0].ofensores, "1 - p1 (100)\n2 - p2 (0)");
    assert_eq!((filas[1].codigo.as_str(), filas[1].valor_glosado), ("C2", 50.0));
    assert!(filas.iter().all(|f| !f.ofensores.contains("NaN")));
}

#[test]
fn muchos_codigos_con_nan_no_rompen_el_orden() {
    let datos: Vec<(String, String)> = (0..40)
        .map(|i| (format!("C{:02}", i), if i % 3 == 0 { "NaN".to_string() } else { (i + 1).to_string() }))
        .collect();
    let filas_in: Vec<(&str, &str, &str, &str, &str)> =
        datos.iter().map(|(c, v)| ("A", "X", c.as_str(), v.as_str(), "p")).collect();
    let filas = construir_reporte(&tabla_texto(&filas_in), &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 8);
    assert_eq!(filas[0].codigo, "C38");
    assert_eq!(filas[0].valor_glosado, 39.0);
    assert!(filas.windows(2).all(|w| w[0].valor_glosado >= w[1].valor_glosado));
}

#[test]
fn monto_infinito_es_valor_no_numerico() {
    let tabla = tabla_texto(&[("A", "X", "C1", "10", "p1"), ("A", "X", "C1", "inf", "p2")]);
    match construir_reporte(&tabla, &ConfigReporte::glosa_inicial()) {
        Err(GlosaError::ValorNoNumerico { fila, valor, .. }) => {
            assert_eq!(fila, 2);
            assert_eq!(valor, "inf");
        }
        other => panic!("esperaba ValorNoNumerico, obtuve {:?}", other),
    }
}

#[test]
fn operadoras_con_igual_total_salen_en_orden_ascendente() {
    let tabla = tabla_inicial(&[
        ("A", "Zulu", "C1", 20.0, "p1"),
        ("A", "Bravo", "C1", 20.0, "p1"),
        ("A", "Mike", "C1", 30.0, "p1"),
    ]);
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    let operadoras: Vec<&str> = filas.iter().map(|f| f.operadora.as_str()).collect();
    assert_eq!(operadoras, vec!["Mike", "Bravo", "Zulu"]);
}

#[test]
fn empate_en_el_octavo_codigo_se_queda_el_menor() {
    let mut filas_in: Vec<(&str, &str, &str, f64, &str)> = vec![
        ("A", "X", "C1", 90.0, "p"),
        ("A", "X", "C2", 80.0, "p"),
        ("A", "X", "C3", 70.0, "p"),
        ("A", "X", "C4", 60.0, "p"),
        ("A", "X", "C5", 50.0, "p"),
        ("A", "X", "C6", 40.0, "p"),
        ("A", "X", "C7", 30.0, "p"),
    ];
    // C9 aparece antes que C8 en la entrada
    filas_in.push(("A", "X", "C9", 5.0, "p"));
    filas_in.push(("A", "X", "C8", 5.0, "p"));
    let filas = construir_reporte(&tabla_inicial(&filas_in), &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 8);
    assert_eq!(filas[7].codigo, "C8");
    assert!(filas.iter().all(|f| f.codigo != "C9"));
}

#[test]
fn codigos_numericos_enormes_no_se_mezclan() {
    let cols: Vec<String> = COLS_INICIAL.iter().map(|c| c.to_string()).collect();
    let tabla = TablaGlosas::new(
        cols,
        vec![
            vec![Valor::texto("A"), Valor::texto("X"), Valor::Numero(1e19), Valor::Numero(1.0), Valor::texto("p")],
            vec![Valor::texto("A"), Valor::texto("X"), Valor::Numero(2e19), Valor::Numero(2.0), Valor::texto("p")],
        ],
    );
    let filas = construir_reporte(&tabla, &ConfigReporte::glosa_inicial()).unwrap();
    assert_eq!(filas.len(), 2);
    assert_ne!(filas[0].codigo, filas[1].codigo);
    assert!(filas.iter().all(|f| f.codigo != i64::MAX.to_string()));
}
