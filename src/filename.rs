use crate::text::title_case;

pub const UNKNOWN_DOCUMENT: &str = "Unknown Document";

/// Display names for the reference library, keyed by the file name the retrieval index stores.
const KNOWN_FILES: &[(&str, &str)] = &[
    (
        "file-bd0016401e94ab.pdf",
        "Reid_1887_Notes_on_the_Birds_of_Teneriffe.pdf",
    ),
    (
        "Madeira-2021.pdf",
        "Flood_2021_Oriole_Birding_Tour_Report_Madeira_Endemics_and_Seabirds.pdf",
    ),
    (
        "condor0811.pdf",
        "Oliveira_et_al_2002_Diet_of_the_Endemic_Madeira_Laurel_Pigeon_and_Fruit_Resource_Availability.pdf",
    ),
    ("madeira-2024-text.pdf", "Koppenol_2024_Madeira_Tour_Report.pdf"),
    (
        "cbirds.2009.0017.pdf",
        "Somasundaram_Vijayan_2010_Foraging_ecology_of_the_globally_threatened_Nilgiri_Wood_Pigeon_in_the_Western_Ghats_India.pdf",
    ),
    (
        "bboc.v144i2.2024.a3.pdf",
        "van_Grouw_et_al_2024_Why_Bolles_Laurel_Pigeon_Columba_bollii_is_not_named_Waglers_Laurel_Pigeon.pdf",
    ),
    ("madeira_tour_report_2021.pdf", "Morris_2021_Madeira_Tour_Report.pdf"),
    (
        "Journal of Avian Biology - 2021 - Marrero - Trophic strategies of two sympatric endemic pigeons in insular ecosystems a.pdf",
        "Marrero_et_al_2021_Trophic_strategies_of_two_sympatric_endemic_pigeons_in_insular_ecosystems.pdf",
    ),
    (
        "Boc097-1986.pdf",
        "van_Grouw_et_al_2024_Why_Bolles_Laurel_Pigeon_Columba_bollii_is_not_named_Waglers_Laurel_Pigeon_Columba_lamprauchen.pdf",
    ),
    (
        "BCI-2004-14-165.pdf",
        "Marrero_et_al_2004_Diet_of_the_endemic_Madeira_Laurel_Pigeon_Columba_trocaz_in_agricultural_and_forest_areas_Implications_for_conservation.pdf",
    ),
    (
        "diet-of-the-endemic-madeira-laurel-pigeon-columba-trocaz-in-agricultural-and-forest-areas-implications-for-conservation.pdf",
        "Marrero_et_al_2004_Diet_of_the_endemic_Madeira_Laurel_Pigeon_Columba_trocaz_in_agricultural_and_forest_areas_Implications_for_conservation.pdf",
    ),
    (
        "2453_columba_trocaz.pdf",
        "BirdLife_International_2021_Columba_trocaz_Madeira_Laurel_pigeon_European_Red_List_of_Birds.pdf",
    ),
    (
        "population_trends_and_status_of_the_madeira_laurel_pigeon_columba_trocaz.pdf",
        "Oliveira_et_al_1999_Population_trends_and_status_of_the_Madeira_Laurel_Pigeon_Columba_trocaz.pdf",
    ),
    (
        "Douradoetal_2013_JOrnithology.pdf",
        "Dourado_et_al_2013_JOrnithology_Phylogenetic_origin_of_the_endemic_pigeons_from_Madeira_and_Azores_Islands.pdf",
    ),
    ("unknown", UNKNOWN_DOCUMENT),
];

/// Maps a source path to a name fit for citations.
///
/// Known files use the curated name; anything else gets `_`/`-` replaced by spaces and
/// title-cased. Missing input yields [`UNKNOWN_DOCUMENT`].
pub fn friendly_filename(source: Option<&str>) -> String {
    let base = source
        .map(base_name)
        .filter(|b| !b.is_empty())
        .unwrap_or("unknown");

    if let Some((_, display)) = KNOWN_FILES.iter().find(|(id, _)| *id == base) {
        return (*display).to_string();
    }

    title_case(&base.replace(['_', '-'], " "))
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
