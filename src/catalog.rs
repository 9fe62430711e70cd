//! Service catalog
//!
//! The business offers a fixed set of services. Albums are tagged with one of
//! them, the gallery filters by them and each one gets its own landing page.

use serde::{Deserialize, Serialize};

/// Service category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Elétrica")]
    Eletrica,
    #[serde(rename = "Hidráulica")]
    Hidraulica,
    #[serde(rename = "Pintura")]
    Pintura,
    #[serde(rename = "Montagem de Móveis")]
    Montagem,
    #[serde(rename = "Instalações")]
    Instalacoes,
    #[serde(rename = "Alvenaria e Drywall")]
    Alvenaria,
}

/// Landing page copy for a service
#[derive(Debug, Clone, Copy)]
pub struct ServiceContent {
    pub title: &'static str,
    pub description: &'static str,
    pub long_description: &'static str,
    pub services: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub keywords: &'static str,
}

const ALL: [Category; 6] = [
    Category::Eletrica,
    Category::Hidraulica,
    Category::Pintura,
    Category::Montagem,
    Category::Instalacoes,
    Category::Alvenaria,
];

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &ALL
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Eletrica => "Elétrica",
            Category::Hidraulica => "Hidráulica",
            Category::Pintura => "Pintura",
            Category::Montagem => "Montagem de Móveis",
            Category::Instalacoes => "Instalações",
            Category::Alvenaria => "Alvenaria e Drywall",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Eletrica => "eletrica",
            Category::Hidraulica => "hidraulica",
            Category::Pintura => "pintura",
            Category::Montagem => "montagem",
            Category::Instalacoes => "instalacoes",
            Category::Alvenaria => "alvenaria",
        }
    }

    /// One-line description used on service cards and the budget form
    pub fn summary(&self) -> &'static str {
        match self {
            Category::Eletrica => "Instalações e reparos elétricos",
            Category::Hidraulica => "Encanamentos e consertos",
            Category::Pintura => "Pintura residencial e comercial",
            Category::Montagem => "Montagem profissional",
            Category::Instalacoes => "Instalações diversas",
            Category::Alvenaria => "Pequenas reformas, paredes e forros",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        ALL.iter().copied().find(|c| c.label() == label)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        ALL.iter().copied().find(|c| c.slug() == slug)
    }

    /// Accepts either the display label or the slug
    pub fn parse(value: &str) -> Option<Self> {
        Self::from_label(value).or_else(|| Self::from_slug(value))
    }

    pub fn labels() -> Vec<&'static str> {
        ALL.iter().map(|c| c.label()).collect()
    }

    pub fn content(&self) -> ServiceContent {
        match self {
            Category::Eletrica => ServiceContent {
                title: "Serviços de Elétrica em São Paulo",
                description: "Eletricista profissional para instalações, manutenções e reparos elétricos residenciais e comerciais",
                long_description: "A Oriani Multissoluções oferece serviços elétricos completos com profissionais qualificados e experientes. Realizamos desde pequenos reparos até instalações elétricas completas, sempre com segurança e qualidade garantida.",
                services: &[
                    "Instalação de tomadas e interruptores",
                    "Troca de disjuntores e quadros elétricos",
                    "Instalação de lustres e luminárias",
                    "Instalação de chuveiros elétricos",
                    "Reparo de curto-circuito",
                    "Adequação de carga elétrica",
                    "Instalação de ventiladores de teto",
                    "Manutenção elétrica preventiva",
                ],
                benefits: &[
                    "Eletricistas certificados",
                    "Atendimento de emergência",
                    "Garantia dos serviços",
                    "Materiais de qualidade",
                ],
                keywords: "eletricista, instalação elétrica, reparo elétrico, tomadas, disjuntores, quadro elétrico",
            },
            Category::Hidraulica => ServiceContent {
                title: "Serviços de Hidráulica e Encanamento",
                description: "Encanador profissional para reparos, instalações e manutenção hidráulica residencial e comercial",
                long_description: "Soluções completas em hidráulica com encanadores especializados. Atendemos vazamentos, entupimentos, instalações e reformas hidráulicas com agilidade e eficiência.",
                services: &[
                    "Reparo de vazamentos",
                    "Desentupimento de pias e ralos",
                    "Instalação de torneiras e registros",
                    "Troca de sifões e válvulas",
                    "Instalação de aquecedores",
                    "Reparo em caixas d'água",
                    "Instalação de filtros",
                    "Manutenção de tubulações",
                ],
                benefits: &[
                    "Atendimento rápido",
                    "Equipamentos modernos",
                    "Diagnóstico preciso",
                    "Preços competitivos",
                ],
                keywords: "encanador, hidráulica, vazamento, desentupimento, torneira, registro",
            },
            Category::Pintura => ServiceContent {
                title: "Serviços de Pintura Residencial e Comercial",
                description: "Pintor profissional para pintura interna, externa, residencial e comercial em São Paulo",
                long_description: "Transforme seus ambientes com nossos serviços de pintura profissional. Trabalhamos com tintas de qualidade e técnicas modernas para garantir acabamento perfeito e durabilidade.",
                services: &[
                    "Pintura interna de residências",
                    "Pintura externa de fachadas",
                    "Pintura de apartamentos",
                    "Aplicação de textura",
                    "Pintura de portões e grades",
                    "Grafiato e texturas especiais",
                    "Preparação de paredes",
                    "Pintura comercial",
                ],
                benefits: &[
                    "Pintores experientes",
                    "Tintas de primeira linha",
                    "Acabamento impecável",
                    "Ambiente protegido",
                ],
                keywords: "pintor, pintura residencial, pintura comercial, textura, grafiato",
            },
            Category::Montagem => ServiceContent {
                title: "Montagem de Móveis Profissional",
                description: "Montador de móveis especializado para montagem e desmontagem de todos os tipos de móveis",
                long_description: "Montagem profissional de móveis planejados e modulados. Garantimos montagem correta, rápida e segura de seus móveis, preservando a integridade e prolongando a vida útil.",
                services: &[
                    "Montagem de guarda-roupas",
                    "Montagem de cozinhas planejadas",
                    "Montagem de estantes e racks",
                    "Montagem de escrivaninhas",
                    "Montagem de berços e cômodas",
                    "Montagem de armários",
                    "Desmontagem e remontagem",
                    "Ajustes e correções",
                ],
                benefits: &[
                    "Montadores experientes",
                    "Ferramentas adequadas",
                    "Cuidado com acabamentos",
                    "Rapidez na execução",
                ],
                keywords: "montador de móveis, montagem de guarda-roupa, montagem de cozinha, móveis planejados",
            },
            Category::Instalacoes => ServiceContent {
                title: "Serviços de Instalações Diversas",
                description: "Instalação profissional de suportes, cortinas, prateleiras e muito mais",
                long_description: "Serviços especializados de instalação para deixar sua casa ou escritório completo. Instalamos desde suportes de TV até sistemas de organização com segurança e precisão.",
                services: &[
                    "Instalação de suportes de TV",
                    "Instalação de cortinas e persianas",
                    "Instalação de prateleiras",
                    "Instalação de quadros e espelhos",
                    "Instalação de ar-condicionado split",
                    "Instalação de ventiladores",
                    "Instalação de trilhos e varões",
                    "Fixação de objetos em geral",
                ],
                benefits: &[
                    "Instalação segura",
                    "Conhecimento técnico",
                    "Ferramentas profissionais",
                    "Garantia de fixação",
                ],
                keywords: "instalação, suporte de tv, cortinas, prateleiras, ar condicionado",
            },
            Category::Alvenaria => ServiceContent {
                title: "Alvenaria e Drywall",
                description: "Pequenas reformas, paredes de drywall, forros e acabamentos em alvenaria",
                long_description: "Executamos reformas rápidas e limpas: divisórias e forros em drywall, reparos de reboco, assentamento de pisos e revestimentos, sempre com planejamento e acabamento cuidadoso.",
                services: &[
                    "Paredes e divisórias em drywall",
                    "Forros e sancas de gesso",
                    "Reparo de trincas e rachaduras",
                    "Reboco e massa corrida",
                    "Assentamento de pisos e revestimentos",
                    "Nichos e prateleiras embutidas",
                    "Pequenas demolições",
                    "Regularização de paredes",
                ],
                benefits: &[
                    "Obra limpa e organizada",
                    "Prazos cumpridos",
                    "Materiais certificados",
                    "Acabamento profissional",
                ],
                keywords: "drywall, alvenaria, forro de gesso, reforma, reboco, divisória",
            },
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
