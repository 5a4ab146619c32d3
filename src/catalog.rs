//! Static catalog of the course offerings.
//!
//! The catalog is the source of truth for canonical course titles and for the
//! instructional hours the schedule calculator works from.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CourseInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub duration: &'static str,
    /// Free text such as `"120 horas"`; see [`parse_total_hours`].
    pub workload: &'static str,
    pub audience: &'static str,
    pub partners: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub modules: &'static [&'static str],
}

impl CourseInfo {
    pub fn total_hours(&self) -> Option<u32> {
        parse_total_hours(self.workload)
    }
}

const PARTNERS: &[&str] = &["SECTI", "CP Goiás", "Programando o Futuro"];

static COURSES: &[CourseInfo] = &[
    CourseInfo {
        slug: "manutencao-computadores-celulares",
        title: "Manutenção de Computadores e Celulares",
        summary: "Formação prática para diagnóstico, reparo e configuração completa de dispositivos.",
        duration: "4 meses",
        workload: "120 horas",
        audience: "Interessados em atuar com suporte técnico, assistências e laboratórios.",
        partners: PARTNERS,
        benefits: &[
            "Laboratório completo com bancada e kits de diagnóstico",
            "Certificação conjunta Sukatech + parceiros oficiais",
            "Simulações de atendimentos reais e checklist profissional",
        ],
        modules: &[
            "Arquitetura de hardware e eletrônica básica",
            "Formatação, backup e otimização de sistemas",
            "Troca de componentes e micro soldagem",
            "Manutenção preventiva e planos de suporte",
            "Atendimento ao cliente e garantia técnica",
        ],
    },
    CourseInfo {
        slug: "excel-avancado",
        title: "Excel Avançado",
        summary: "Automação de planilhas, dashboards e análise de dados corporativos.",
        duration: "3 meses",
        workload: "90 horas",
        audience: "Profissionais que desejam dominar análises, relatórios e automações no Excel.",
        partners: PARTNERS,
        benefits: &[
            "Projetos guiados baseados em cenários reais de negócios",
            "Templates exclusivos e reutilizáveis",
            "Mentorias coletivas com especialistas em BI",
        ],
        modules: &[
            "Funções avançadas, PROCX e LET",
            "Dashboards com gráficos dinâmicos",
            "Power Query e tratamento de dados",
            "Automação com macros e VBA",
            "Boas práticas para relatórios executivos",
        ],
    },
    CourseInfo {
        slug: "marketing-digital",
        title: "Marketing Digital",
        summary: "Estratégias de conteúdo, redes sociais e performance para negócios.",
        duration: "4 meses",
        workload: "110 horas",
        audience: "Empreendedores, creators e equipes de comunicação.",
        partners: PARTNERS,
        benefits: &[
            "Calendários editáveis e kits de pauta",
            "Laboratórios de mídia paga com simuladores",
            "Acompanhamento individual de projetos",
        ],
        modules: &[
            "Branding e posicionamento digital",
            "Copywriting e funil de conteúdo",
            "Gestão de redes sociais e social ads",
            "Métricas, KPIs e ferramentas de analytics",
            "Growth e automação de marketing",
        ],
    },
    CourseInfo {
        slug: "introducao-ia",
        title: "Introdução à IA",
        summary: "Fundamentos de inteligência artificial, aplicações e ferramentas práticas.",
        duration: "2 meses",
        workload: "80 horas",
        audience: "Profissionais e estudantes que desejam iniciar na área de IA aplicada.",
        partners: PARTNERS,
        benefits: &[
            "Laboratórios com as principais ferramentas de IA generativa",
            "Projetos guiados para diferentes áreas de negócio",
            "Curadoria semanal de novidades do ecossistema IA",
        ],
        modules: &[
            "Conceitos fundamentais de IA e ML",
            "Ferramentas generativas para texto, imagem e dados",
            "Criação de assistentes e automações com IA",
            "Ética, segurança e governança",
            "Protótipos guiados por desafios reais",
        ],
    },
    CourseInfo {
        slug: "informatica-basica",
        title: "Informática Básica",
        summary: "Conceitos essenciais de hardware, software e produtividade no dia a dia.",
        duration: "2 meses",
        workload: "60 horas",
        audience: "Iniciantes que buscam dominar o computador para estudos e trabalho.",
        partners: PARTNERS,
        benefits: &[
            "Aulas presenciais e suporte remoto",
            "Material didático ilustrado e acessível",
            "Simulados de certificação digital",
        ],
        modules: &[
            "Ambiente Windows e organização de arquivos",
            "Pacote Office essencial",
            "Navegação segura na internet e cidadania digital",
            "Serviços em nuvem e colaboração",
            "Introdução à manutenção preventiva",
        ],
    },
];

pub fn courses() -> &'static [CourseInfo] {
    COURSES
}

pub fn find_by_slug(slug: &str) -> Option<&'static CourseInfo> {
    COURSES.iter().find(|c| c.slug == slug)
}

pub fn find_by_title(title: &str) -> Option<&'static CourseInfo> {
    COURSES.iter().find(|c| c.title == title)
}

/// Whether `name` is one of the canonical course titles (exact match).
pub fn is_canonical_title(name: &str) -> bool {
    find_by_title(name).is_some()
}

/// Extracts the first run of digits from a workload text (`"120 horas"` -> 120).
pub fn parse_total_hours(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
