//! Static catalog of post-graduate tech programs, with in-memory filtering
//! and deterministic ranking. Loaded once at first use; immutable after.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    #[serde(rename = "pos-graduacao")]
    PosGraduacao,
    #[serde(rename = "mestrado")]
    Mestrado,
    #[serde(rename = "doutorado")]
    Doutorado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseModality {
    Presencial,
    Ead,
    Hibrido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseShift {
    Matutino,
    Vespertino,
    Noturno,
    Flexivel,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::PosGraduacao => "pos-graduacao",
            CourseLevel::Mestrado => "mestrado",
            CourseLevel::Doutorado => "doutorado",
        }
    }
}

impl CourseModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseModality::Presencial => "presencial",
            CourseModality::Ead => "ead",
            CourseModality::Hibrido => "hibrido",
        }
    }
}

impl CourseShift {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseShift::Matutino => "matutino",
            CourseShift::Vespertino => "vespertino",
            CourseShift::Noturno => "noturno",
            CourseShift::Flexivel => "flexivel",
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos-graduacao" => Ok(CourseLevel::PosGraduacao),
            "mestrado" => Ok(CourseLevel::Mestrado),
            "doutorado" => Ok(CourseLevel::Doutorado),
            other => Err(format!("unknown course level: {other}")),
        }
    }
}

impl std::str::FromStr for CourseModality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "presencial" => Ok(CourseModality::Presencial),
            "ead" => Ok(CourseModality::Ead),
            "hibrido" => Ok(CourseModality::Hibrido),
            other => Err(format!("unknown course modality: {other}")),
        }
    }
}

/// One catalog entry. `mec_grade` is the official 0–5 evaluation when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub institution: String,
    pub program: String,
    pub level: CourseLevel,
    pub modality: CourseModality,
    pub shift: CourseShift,
    pub area: String,
    pub city: String,
    pub state: String,
    pub duration: String,
    pub url: String,
    pub mec_recognized: bool,
    pub mec_grade: Option<u8>,
    pub price: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
}

/// Catalog search input. `None` filters mean "all".
#[derive(Debug, Clone, Default)]
pub struct CourseFilters {
    pub query: String,
    pub modality: Option<CourseModality>,
    pub level: Option<CourseLevel>,
}

/// Pure reduction over the catalog, for the stats surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseStats {
    pub total: usize,
    pub presencial: usize,
    pub ead: usize,
    pub mestrado: usize,
    pub pos_graduacao: usize,
    pub doutorado: usize,
    pub recife: usize,
    pub com_bolsa: usize,
}

/// Filter and rank the catalog.
///
/// Every whitespace-separated query term must appear (case-insensitive, AND
/// semantics) somewhere in institution+program+area+city+description+tags.
/// Ranking: Recife first, then MEC grade descending (absent grade counts as
/// zero), then institution name ascending.
pub fn search_courses(filters: &CourseFilters) -> Vec<Course> {
    let mut results: Vec<Course> = curated_courses()
        .iter()
        .filter(|c| filters.modality.is_none_or(|m| c.modality == m))
        .filter(|c| filters.level.is_none_or(|l| c.level == l))
        .cloned()
        .collect();

    let query = filters.query.trim().to_lowercase();
    if !query.is_empty() {
        let terms: Vec<&str> = query.split_whitespace().collect();
        results.retain(|course| {
            let haystack = course_haystack(course);
            terms.iter().all(|term| haystack.contains(term))
        });
    }

    results.sort_by(|a, b| {
        let in_recife_a = a.city.eq_ignore_ascii_case("recife");
        let in_recife_b = b.city.eq_ignore_ascii_case("recife");
        in_recife_b
            .cmp(&in_recife_a)
            .then_with(|| b.mec_grade.unwrap_or(0).cmp(&a.mec_grade.unwrap_or(0)))
            .then_with(|| a.institution.to_lowercase().cmp(&b.institution.to_lowercase()))
    });

    results
}

pub fn all_courses() -> &'static [Course] {
    curated_courses()
}

pub fn course_stats() -> CourseStats {
    let courses = curated_courses();
    CourseStats {
        total: courses.len(),
        presencial: courses.iter().filter(|c| c.modality == CourseModality::Presencial).count(),
        ead: courses.iter().filter(|c| c.modality == CourseModality::Ead).count(),
        mestrado: courses.iter().filter(|c| c.level == CourseLevel::Mestrado).count(),
        pos_graduacao: courses.iter().filter(|c| c.level == CourseLevel::PosGraduacao).count(),
        doutorado: courses.iter().filter(|c| c.level == CourseLevel::Doutorado).count(),
        recife: courses.iter().filter(|c| c.city.eq_ignore_ascii_case("recife")).count(),
        com_bolsa: courses
            .iter()
            .filter(|c| c.price.as_deref().is_some_and(|p| p.contains("Bolsa")))
            .count(),
    }
}

fn course_haystack(course: &Course) -> String {
    let mut parts = vec![
        course.institution.as_str(),
        course.program.as_str(),
        course.area.as_str(),
        course.city.as_str(),
        course.description.as_str(),
    ];
    parts.extend(course.tags.iter().map(String::as_str));
    parts.join(" ").to_lowercase()
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    institution: &str,
    program: &str,
    level: CourseLevel,
    modality: CourseModality,
    shift: CourseShift,
    area: &str,
    city: &str,
    state: &str,
    duration: &str,
    url: &str,
    mec_grade: Option<u8>,
    price: Option<&str>,
    description: &str,
    tags: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        institution: institution.to_string(),
        program: program.to_string(),
        level,
        modality,
        shift,
        area: area.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        duration: duration.to_string(),
        url: url.to_string(),
        mec_recognized: true,
        mec_grade,
        price: price.map(str::to_string),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn curated_courses() -> &'static [Course] {
    static COURSES: LazyLock<Vec<Course>> = LazyLock::new(|| {
        use CourseLevel::*;
        use CourseModality::*;
        use CourseShift::*;

        vec![
            course(
                "ufpe-mestrado-cc",
                "UFPE - Centro de Informática (CIn)",
                "Mestrado Acadêmico em Ciência da Computação",
                Mestrado,
                Presencial,
                Flexivel,
                "Ciência da Computação",
                "Recife",
                "PE",
                "24 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/stricto-sensu/programa-academico/",
                Some(5),
                Some("Gratuito"),
                "Programa de pós-graduação stricto sensu do CIn/UFPE com conceito CAPES 7 (nota máxima). Linhas de pesquisa em engenharia de software, IA, sistemas distribuídos, redes e mais. Possibilidade de bolsa CAPES/CNPq. Gratuito por ser universidade federal.",
                &["Gratuito", "CAPES 7", "Federal", "Bolsa", "Pesquisa"],
            ),
            course(
                "ufpe-mestrado-ec",
                "UFPE - Centro de Informática (CIn)",
                "Mestrado Acadêmico em Engenharia da Computação",
                Mestrado,
                Presencial,
                Flexivel,
                "Engenharia da Computação",
                "Recife",
                "PE",
                "24 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/stricto-sensu/programa-academico/",
                Some(5),
                Some("Gratuito"),
                "Mestrado acadêmico em Engenharia da Computação no CIn/UFPE. Foco em sistemas embarcados, redes, computação em nuvem e engenharia de software. Conceito CAPES 7. Possibilidade de bolsa. Gratuito.",
                &["Gratuito", "CAPES 7", "Federal", "Bolsa", "Engenharia"],
            ),
            course(
                "ufpe-mestrado-prof",
                "UFPE - Centro de Informática (CIn)",
                "Mestrado Profissional em Ciência da Computação",
                Mestrado,
                Presencial,
                Flexivel,
                "Ciência da Computação",
                "Recife",
                "PE",
                "24 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/stricto-sensu/programa-profissional/",
                Some(5),
                Some("Gratuito"),
                "Mestrado profissional stricto sensu do CIn/UFPE voltado a profissionais do mercado. Foco em pesquisa aplicada em engenharia de software, IA e sistemas. Gratuito por ser universidade federal pública.",
                &["Gratuito", "Federal", "Profissional", "Pesquisa Aplicada"],
            ),
            course(
                "ufpe-doutorado",
                "UFPE - Centro de Informática (CIn)",
                "Doutorado em Ciência da Computação",
                Doutorado,
                Presencial,
                Flexivel,
                "Ciência da Computação",
                "Recife",
                "PE",
                "48 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/stricto-sensu/programa-academico/",
                Some(5),
                Some("Gratuito"),
                "Doutorado acadêmico do CIn/UFPE com conceito CAPES 7 (nota máxima no Brasil). Pesquisa de ponta em engenharia de software, inteligência artificial, segurança e mais. Possibilidade de bolsa CAPES/CNPq. Gratuito.",
                &["Gratuito", "CAPES 7", "Federal", "Bolsa", "Doutorado"],
            ),
            course(
                "ufpe-residencia-software",
                "UFPE - CIn (parceria Motorola)",
                "Residência em Software",
                PosGraduacao,
                Presencial,
                Flexivel,
                "Engenharia de Software / Testes",
                "Recife",
                "PE",
                "12 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/especializacoes-2/residencia-2/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Modelo pioneiro de residência em software criado no CIn/UFPE em parceria com a Motorola. Imersão em ambiente acadêmico e fábrica de software/teste. Foco em planejamento, automação e execução de testes em aplicações mobile. Gratuito com possibilidade de bolsa de pesquisa.",
                &["Gratuito", "Bolsa", "Residência", "Testes", "Mobile"],
            ),
            course(
                "ufpe-residencia-dev",
                "UFPE - CIn (parceria Emprel)",
                "Residência em Desenvolvimento de Software",
                PosGraduacao,
                Presencial,
                Flexivel,
                "Desenvolvimento de Software",
                "Recife",
                "PE",
                "12 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/especializacoes-2/residencia-2/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Programa de residência em desenvolvimento de software do CIn/UFPE em parceria com a Emprel. Objetivo de formar recursos humanos com alto grau de especialização em desenvolvimento de software. Gratuito com bolsa.",
                &["Gratuito", "Bolsa", "Residência", "Dev", "Software"],
            ),
            course(
                "ufpe-residencia-robotica",
                "UFPE - CIn (parceria Softex)",
                "Residência em Robótica e IA Aplicadas a Testes de Software",
                PosGraduacao,
                Presencial,
                Flexivel,
                "IA / Testes de Software",
                "Recife",
                "PE",
                "12 meses",
                "https://residenciarobotica.cin.ufpe.br/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Residência do CIn/UFPE em parceria com Softex. Laboratórios equipados com robôs e materiais para prototipação. Foco em testes práticos, IA e desenvolvimento de software com impacto social. Gratuito com bolsa.",
                &["Gratuito", "Bolsa", "IA", "Robótica", "Testes"],
            ),
            course(
                "ufpe-residencia-dados",
                "UFPE - CIn (parceria Samsung)",
                "Residência em Engenharia e Ciência de Dados",
                PosGraduacao,
                Presencial,
                Flexivel,
                "Ciência de Dados",
                "Recife",
                "PE",
                "12 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/especializacoes-2/residencia-2/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Residência do CIn/UFPE em parceria com a Samsung (19 anos de parceria). Vivência em ambiente empresarial com base teórica de excelência em engenharia e ciência de dados. Gratuito com bolsa.",
                &["Gratuito", "Bolsa", "Dados", "Samsung", "Residência"],
            ),
            course(
                "ufpe-residencia-visao",
                "UFPE - CIn (parceria Samsung)",
                "Residência em Visão Computacional",
                PosGraduacao,
                Presencial,
                Flexivel,
                "Visão Computacional / IA",
                "Recife",
                "PE",
                "12 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/especializacoes-2/residencia-2/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Residência do CIn/UFPE em parceria com a Samsung. Capacitação em conceitos alinhados às demandas atuais do mercado de tecnologia. Foco em visão computacional e processamento de imagens. Gratuito com bolsa.",
                &["Gratuito", "Bolsa", "Visão Computacional", "IA", "Samsung"],
            ),
            course(
                "ufpe-residencia-auto-dev",
                "UFPE - CIn (parceria Stellantis)",
                "Residência em Desenvolvimento de Software para Setor Automotivo",
                PosGraduacao,
                Presencial,
                Flexivel,
                "Engenharia de Software Automotivo",
                "Recife",
                "PE",
                "12 meses",
                "https://portal.cin.ufpe.br/pos-graduacao/especializacoes-2/residencia-2/",
                Some(5),
                Some("Gratuito + Bolsa"),
                "Residência do CIn/UFPE em parceria com a Stellantis. Formação para aprimorar habilidades em desenvolvimento de software com aprendizado direcionado por profissionais experientes. Gratuito com bolsa de pesquisa.",
                &["Gratuito", "Bolsa", "Automotivo", "Stellantis", "Dev"],
            ),
            course(
                "ufrpe-mestrado",
                "UFRPE - Universidade Federal Rural de Pernambuco",
                "Mestrado em Informática Aplicada",
                Mestrado,
                Presencial,
                Flexivel,
                "Informática Aplicada",
                "Recife",
                "PE",
                "24 meses",
                "http://www.ppgia.ufrpe.br/",
                Some(4),
                Some("Gratuito"),
                "Mestrado acadêmico em Informática Aplicada na UFRPE. Linhas de pesquisa em engenharia de software, inteligência computacional e sistemas de informação. Possibilidade de bolsa CAPES/CNPq. Gratuito por ser universidade federal.",
                &["Gratuito", "Federal", "Bolsa", "Pesquisa", "CAPES"],
            ),
            course(
                "upe-mestrado",
                "Universidade de Pernambuco (UPE)",
                "Mestrado em Engenharia da Computação",
                Mestrado,
                Presencial,
                Flexivel,
                "Engenharia da Computação",
                "Recife",
                "PE",
                "24 meses",
                "http://www.ppgec.ecomp.poli.br/",
                Some(4),
                Some("Gratuito"),
                "Mestrado acadêmico em Engenharia da Computação na UPE/Poli. Linhas de pesquisa em engenharia de software, computação inteligente e sistemas distribuídos. Possibilidade de bolsa. Gratuito por ser universidade estadual pública.",
                &["Gratuito", "Estadual", "Bolsa", "Pesquisa", "CAPES"],
            ),
            course(
                "ifpe-pos-ti",
                "IFPE - Instituto Federal de Pernambuco",
                "Especialização em Tecnologia da Informação",
                PosGraduacao,
                Presencial,
                Noturno,
                "Tecnologia da Informação",
                "Recife",
                "PE",
                "18 meses",
                "https://portal.ifpe.edu.br/o-ifpe/pesquisa-pos-graduacao-e-inovacao/pos-graduacao/",
                Some(4),
                Some("Gratuito"),
                "Pós-graduação lato sensu gratuita no IFPE campus Recife. Formação especializada em TI com foco em demandas do mercado local e regional. Gratuito por ser instituto federal público.",
                &["Gratuito", "Federal", "Instituto Federal", "TI"],
            ),
        ]
    });
    &COURSES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_terms_use_and_semantics_over_all_text_fields() {
        let filters = CourseFilters {
            query: "mestrado recife".to_string(),
            modality: None,
            level: None,
        };
        let results = search_courses(&filters);
        assert!(!results.is_empty());
        for course in &results {
            let haystack = course_haystack(course);
            assert!(haystack.contains("mestrado"));
            assert!(haystack.contains("recife"));
        }
    }

    #[test]
    fn modality_and_level_filters_are_exact() {
        let filters = CourseFilters {
            query: String::new(),
            modality: Some(CourseModality::Presencial),
            level: Some(CourseLevel::Mestrado),
        };
        let results = search_courses(&filters);
        assert!(!results.is_empty());
        assert!(results.iter().all(|c| {
            c.modality == CourseModality::Presencial && c.level == CourseLevel::Mestrado
        }));
    }

    #[test]
    fn ranking_is_recife_then_grade_then_institution() {
        let filters = CourseFilters {
            query: String::new(),
            modality: Some(CourseModality::Presencial),
            level: Some(CourseLevel::Mestrado),
        };
        let results = search_courses(&filters);

        // grade-5 CIn programs come before the grade-4 entries
        let grades: Vec<u8> = results.iter().map(|c| c.mec_grade.unwrap_or(0)).collect();
        let mut sorted = grades.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(grades, sorted);

        // among the grade-4 pair, UFRPE collates before "Universidade de Pernambuco"
        let tail: Vec<&str> = results
            .iter()
            .filter(|c| c.mec_grade == Some(4))
            .map(|c| c.institution.as_str())
            .collect();
        assert_eq!(
            tail,
            vec![
                "UFRPE - Universidade Federal Rural de Pernambuco",
                "Universidade de Pernambuco (UPE)"
            ]
        );
    }

    #[test]
    fn unfiltered_search_returns_whole_catalog() {
        let results = search_courses(&CourseFilters::default());
        assert_eq!(results.len(), all_courses().len());
    }

    #[test]
    fn no_match_yields_empty_not_error() {
        let filters = CourseFilters {
            query: "astrofísica marte".to_string(),
            modality: None,
            level: None,
        };
        assert!(search_courses(&filters).is_empty());
    }

    #[test]
    fn stats_reduce_the_whole_catalog() {
        let stats = course_stats();
        assert_eq!(stats.total, all_courses().len());
        assert_eq!(stats.presencial, stats.total); // every curated entry is on-site
        assert_eq!(stats.ead, 0);
        assert_eq!(
            stats.mestrado + stats.pos_graduacao + stats.doutorado,
            stats.total
        );
        assert_eq!(stats.recife, stats.total); // every curated entry is in Recife
        assert!(stats.com_bolsa >= 5); // the residency programs all carry "Bolsa"
    }
}
