//! The compiled-in course catalog.
//!
//! Four core modules count toward completion; the fifth is a bonus module
//! unlocked by enrollment age and excluded from the completion percentage.

use crate::model::ids::ModuleId;

/// Number of modules counted by the completion percentage.
pub const CORE_MODULE_COUNT: u32 = 4;

/// The module gated behind the enrollment-age rule.
pub const BONUS_MODULE_ID: ModuleId = ModuleId::new(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleKind {
    Core,
    Bonus,
}

/// A downloadable/viewable document attached to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    title: &'static str,
    source_url: &'static str,
}

impl Material {
    const fn new(title: &'static str, source_url: &'static str) -> Self {
        Self { title, source_url }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// The share link as published by the content team.
    #[must_use]
    pub fn source_url(&self) -> &'static str {
        self.source_url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    title: &'static str,
    subtitle: &'static str,
    heading: &'static str,
    kind: ModuleKind,
    materials: &'static [Material],
}

impl Module {
    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Short title shown on dashboard cards.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &'static str {
        self.subtitle
    }

    /// Full heading shown at the top of the module page.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        self.heading
    }

    #[must_use]
    pub fn is_bonus(&self) -> bool {
        self.kind == ModuleKind::Bonus
    }

    /// Materials in presentation order.
    #[must_use]
    pub fn materials(&self) -> &'static [Material] {
        self.materials
    }
}

const MODULE_1_MATERIALS: &[Material] = &[
    Material::new(
        "Panetone Lucrativo – Guia Oficial",
        "https://drive.google.com/file/d/1GjgDM3tJdYBUZ4p6t_tmrV5eUBdl3fqm/view?usp=sharing",
    ),
    Material::new(
        "Receitas Premium de Panetone Artesanal",
        "https://drive.google.com/file/d/1GjgDM3tJdYBUZ4p6t_tmrV5eUBdl3fqm/view?usp=sharing",
    ),
    Material::new(
        "Guia de Precificação e Lucro",
        "https://drive.google.com/file/d/1iqNmds28FmQj_oFGyw17-I693RyqKNoh/view?usp=sharing",
    ),
    Material::new(
        "Estratégia de Vendas no WhatsApp",
        "https://drive.google.com/file/d/1xtRFd45FzJHw9v6e2ohGvwdQXIkwy1hr/view?usp=sharing",
    ),
    Material::new(
        "Embalagens, Branding e Apresentação",
        "https://drive.google.com/file/d/1W2y2rRtj9vSVwOwsnIbrAPx4MSvRRuPd/view?usp=sharing",
    ),
];

const MODULE_2_MATERIALS: &[Material] = &[
    Material::new(
        "Padronização Profissional dos Panetones",
        "https://drive.google.com/file/d/1RdxHpKN6cqB1C_tnWGvhplHCd-B-Y_9Q/view?usp=sharing",
    ),
    Material::new(
        "Máquinas, Equipamentos e Ferramentas Essenciais",
        "https://drive.google.com/file/d/1s086ajo3u6ltHo1K_e34hBWs9zjk8ZLr/view?usp=sharing",
    ),
    Material::new(
        "Checklists de Produção, Estoque e Entrega",
        "https://drive.google.com/file/d/1mrgFZS7ZR1V51t37OKBH83lcSDS51u-k/view?usp=sharing",
    ),
    Material::new(
        "Calendário de Produção e Vendas do Natal",
        "https://drive.google.com/file/d/1SkQdrWakEkY6Jf9-f6pNVFn038_Jv-yi/view?usp=sharing",
    ),
    Material::new(
        "Catálogo de Sabores e Combos para Vender",
        "https://drive.google.com/file/d/11KvzUlpflXGmvhCTY-shFXc5vMUBm9Ab/view?usp=sharing",
    ),
];

const MODULE_3_MATERIALS: &[Material] = &[
    Material::new(
        "Branding & Identidade de Luxo para Panetones",
        "https://drive.google.com/file/d/1wtnTj4w6Zc9TOX9bl4f_EaESs7m8kemk/view?usp=sharing",
    ),
    Material::new(
        "Copywriting de Natal – Textos que Vendem Panetones",
        "https://drive.google.com/file/d/1xwej800wvLIoB1jhCzi2NqxT4X9OPOI3/view?usp=sharing",
    ),
    Material::new(
        "Guia de Conteúdo para Viralizar no Instagram",
        "https://drive.google.com/file/d/1F3pA6SDJ006TEcXeWcKQYrc31baTVWj9/view?usp=sharing",
    ),
    Material::new(
        "Manual Completo de Anúncios para Panetones",
        "https://drive.google.com/file/d/1LGAckMIO9jtwxL6K57K8TMYdYgzGS7iP/view?usp=sharing",
    ),
    Material::new(
        "Entrega, Logística e Embalagem Profissional",
        "https://drive.google.com/file/d/1lp-fFgIyeFcZRd2w1L5XduA-2KKTO4_-/view?usp=sharing",
    ),
];

const MODULE_4_MATERIALS: &[Material] = &[
    Material::new(
        "Escala Inteligente: Como Produzir Mais Sem Perder Qualidade",
        "https://drive.google.com/file/d/1DAKxnm1Bpvz7EBzgaE6_il6MM6t0igCi/view?usp=sharing",
    ),
    Material::new(
        "Automação de Vendas – Do Status ao Caixa",
        "https://drive.google.com/file/d/1yBVbC2wF1rnOoLEw2rbScaQydfsbzjrP/view?usp=sharing",
    ),
    Material::new(
        "LTV & Recorrência – Fazendo o Cliente Comprar 2, 3, 4 Vezes",
        "https://drive.google.com/file/d/1B-9ANvTYaCeCtlNlYYb_AwMhQNdsl01-/view?usp=sharing",
    ),
    Material::new(
        "Gestão Financeira Simples para Panetones",
        "https://drive.google.com/file/d/1ynA-FCxKcDP5zz_B51lHD5J_d_AsxUZD/view?usp=sharing",
    ),
    Material::new(
        "Escala de Equipe, Parcerias e Terceirização Inteligente",
        "https://drive.google.com/file/d/1gZRT_Tmc3Wev5WnILgzoTgz971uTwK9_/view?usp=sharing",
    ),
];

const MODULE_5_MATERIALS: &[Material] = &[
    Material::new(
        "A Oferta Suprema de Natal",
        "https://drive.google.com/file/d/1uH9DTUsa9Sm_pt3yAfmxiqdQtpZgAv34/view?usp=sharing",
    ),
    Material::new(
        "Efeito Viral: Como Fazer seus Panetones Espalharem como Fogo",
        "https://drive.google.com/file/d/11uRjezUy0LGH8OaukNME8zRCDHepUqNm/view?usp=sharing",
    ),
    Material::new(
        "Ads Avançado: Criativos Profissionais que Vendem Muito no Natal",
        "https://drive.google.com/file/d/14HLQF54HIVgp3rNVNpskfXcw-FU0Ln7H/view?usp=sharing",
    ),
    Material::new(
        "O Método X1 Aristocrata – Vendendo sem Parecer Vendedor",
        "https://drive.google.com/file/d/1ATHgEOY6Q-XDpxFmotl17j2HiaNfe_jm/view?usp=sharing",
    ),
    Material::new(
        "Efeito Cliente Ouro – Criando Fãs que Compram Todo Ano",
        "https://drive.google.com/file/d/1vv34-RC1Jkg9dlFoBJ0qegK5uHPxiX2p/view?usp=sharing",
    ),
];

static MODULES: [Module; 5] = [
    Module {
        id: ModuleId::new(1),
        title: "Começando do Zero",
        subtitle: "Panetones que Vendem",
        heading: "📘 MÓDULO 1 — Começando do Zero: Panetones que Vendem",
        kind: ModuleKind::Core,
        materials: MODULE_1_MATERIALS,
    },
    Module {
        id: ModuleId::new(2),
        title: "Produção Profissional",
        subtitle: "sem Complicação",
        heading: "📕 MÓDULO 2 — Produção Profissional sem Complicação",
        kind: ModuleKind::Core,
        materials: MODULE_2_MATERIALS,
    },
    Module {
        id: ModuleId::new(3),
        title: "Marketing e Vendas",
        subtitle: "para Bombar no Natal",
        heading: "📙 MÓDULO 3 — Marketing e Vendas para Bombar no Natal",
        kind: ModuleKind::Core,
        materials: MODULE_3_MATERIALS,
    },
    Module {
        id: ModuleId::new(4),
        title: "Aumentar Produção",
        subtitle: "e Multiplicar Lucros",
        heading: "📗 MÓDULO 4 — Como Aumentar Produção e Multiplicar Lucros",
        kind: ModuleKind::Core,
        materials: MODULE_4_MATERIALS,
    },
    Module {
        id: BONUS_MODULE_ID,
        title: "Estratégias Secretas",
        subtitle: "para Vender Muito Mais",
        heading: "📓 MÓDULO 5 — Estratégias Secretas para Vender Muito Mais",
        kind: ModuleKind::Bonus,
        materials: MODULE_5_MATERIALS,
    },
];

/// All modules in display order.
#[must_use]
pub fn modules() -> &'static [Module] {
    &MODULES
}

#[must_use]
pub fn find_module(id: ModuleId) -> Option<&'static Module> {
    modules().iter().find(|module| module.id == id)
}

/// Modules counted toward the completion percentage.
pub fn core_modules() -> impl Iterator<Item = &'static Module> {
    modules()
        .iter()
        .filter(|module| module.kind == ModuleKind::Core)
}

#[must_use]
pub fn bonus_module() -> &'static Module {
    let modules = modules();
    &modules[modules.len() - 1]
}

#[must_use]
pub fn is_catalogued(id: ModuleId) -> bool {
    find_module(id).is_some()
}

#[must_use]
pub fn is_core(id: ModuleId) -> bool {
    find_module(id).is_some_and(|module| module.kind == ModuleKind::Core)
}
