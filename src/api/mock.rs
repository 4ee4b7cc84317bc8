// src/api/mock.rs
// In-process stand-in for the analysis service, used by the tests.
use axum::Router;
use serde_json::{json, Value};

pub const LINEAR_SEARCH: &str = "PROCEDURE busquedaLineal(A, x)
  n ← length(A)
  FOR i ← 0 TO n-1 DO
    IF A[i] = x THEN
      RETURN i
    END IF
  END FOR
  RETURN -1
END PROCEDURE";

/// Serves `router` on an ephemeral port of the current runtime and returns
/// its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock backend");
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

pub fn lexical_failure_report() -> Value {
    json!({
        "valido_general": false,
        "tipo_algoritmo": "Iterativo",
        "capas": {
            "1_LEXICA": { "valido": false, "errores": ["Token inesperado en línea 3"], "detalles": [] },
            "2_DECLARACIONES": { "valido": true, "errores": [], "detalles": ["Sin clases"] },
            "3_ESTRUCTURA": { "valido": true, "errores": [], "detalles": [] }
        },
        "resumen": {
            "total_lineas": 3,
            "clases_encontradas": 0,
            "subrutinas_encontradas": 0,
            "errores_totales": 1
        },
        "clasificacion": null,
        "sugerencias": ["Revisa la asignación de la línea 3"]
    })
}

pub fn linear_search_result() -> Value {
    let layers: Value = [
        "1_LEXICA",
        "2_DECLARACIONES",
        "3_ESTRUCTURA",
        "4_EXPRESIONES",
        "5_SENTENCIAS",
        "6_SUBRUTINAS",
        "7_SEMANTICA",
    ]
    .iter()
    .map(|key| (key.to_string(), json!({ "valido": true, "errores": [], "detalles": [] })))
    .collect::<serde_json::Map<String, Value>>()
    .into();

    json!({
        "exito": true,
        "fase_actual": "completado",
        "pseudocodigo_original": LINEAR_SEARCH,
        "pseudocodigo_validado": LINEAR_SEARCH,
        "validacion": {
            "valido_general": true,
            "tipo_algoritmo": "Iterativo",
            "algorithm_name": "busquedaLineal",
            "capas": layers,
            "resumen": { "total_lineas": 9, "clases_encontradas": 0, "subrutinas_encontradas": 1, "errores_totales": 0 }
        },
        "correccion": null,
        "costos_por_linea": {
            "algorithm_name": "busquedaLineal",
            "scenarios": [
                {
                    "id": "S_best",
                    "condition": "A[0] = x",
                    "state": "Éxito inmediato",
                    "cost_T": "4",
                    "probability_P": "1/n",
                    "line_costs": [
                        { "line_number": 2, "code": "n ← length(A)", "C_op": 1, "Freq": "1", "Total": "1" },
                        { "line_number": 3, "code": "FOR i ← 0 TO n-1 DO", "C_op": 1, "Freq": "1", "Total": "1" }
                    ]
                },
                {
                    "id": "S_fail",
                    "condition": "x ∉ A",
                    "state": "Fracaso",
                    "cost_T": "2n + 2",
                    "probability_P": "q"
                }
            ]
        },
        "ecuaciones": {
            "mejor_caso": "T(n) = 1",
            "caso_promedio": "T(n) = n/2",
            "peor_caso": "T(n) = n"
        },
        "complejidades": {
            "complejidades": { "mejor_caso": "Ω(1)", "caso_promedio": "Θ(n)", "peor_caso": "O(n)" },
            "metodo_usado": "Sumatoria directa",
            "ecuaciones": { "mejor_caso": "T(n) = 1", "caso_promedio": "T(n) = n/2", "peor_caso": "T(n) = n" },
            "pasos_resolucion": {
                "peor_caso": {
                    "ecuacion": "T(n) = n",
                    "metodo": "Sumatoria directa",
                    "pasos": ["Identificar el término dominante", "T(n) = n ∈ O(n)"],
                    "explicacion": "Lineal en n",
                    "solucion": "O(n)"
                }
            },
            "observacion": "Búsqueda secuencial sin ordenamiento previo"
        },
        "clasificacion": {
            "categoria_principal": "busqueda_lineal",
            "confianza": 0.87,
            "top_predicciones": [
                { "categoria": "busqueda_lineal", "probabilidad": 0.87 },
                { "categoria": "recorrido_arreglo", "probabilidad": 0.08 },
                { "categoria": "busqueda_binaria", "probabilidad": 0.05 }
            ]
        },
        "errores": []
    })
}
