use clap::Args;
use prettytable::{format, Cell, Row, Table};
use vesyncapi::{DeviceCategory, DeviceModel};

#[derive(Args)]
pub(crate) struct DevicesArgs {
    #[clap(help = "model string as reported by the cloud, e.g. ESW03-USA")]
    model: Option<String>,
    #[clap(long, short = 't', help = "one of outlets, switches, fans, bulbs")]
    category: Option<String>,
}

pub(crate) fn devices(args: DevicesArgs) -> anyhow::Result<()> {
    let category = args
        .category
        .as_deref()
        .map(str::parse::<DeviceCategory>)
        .transpose()?;

    let models: Vec<DeviceModel> = match (args.model, category) {
        (Some(model), _) => vec![model.parse()?],
        (None, Some(category)) => DeviceModel::in_category(category).collect(),
        (None, None) => DeviceModel::ALL.to_vec(),
    };

    debug!("showing {} device models", models.len());
    print_device_table(&models);

    Ok(())
}

fn create_table() -> Table {
    let mut table = Table::new();
    let fmt = format::FormatBuilder::new()
        .padding(1, 1)
        .separator(
            format::LinePosition::Title,
            format::LineSeparator::new('-', '+', '+', '+'),
        )
        .column_separator('|')
        .build();
    table.set_format(fmt);
    table
}

fn print_device_table(models: &[DeviceModel]) {
    let mut table = create_table();
    table.set_titles(Row::new(vec![
        Cell::new_align("model", format::Alignment::CENTER),
        Cell::new_align("class", format::Alignment::CENTER),
        Cell::new_align("category", format::Alignment::CENTER),
    ]));

    for model in models {
        table.add_row(Row::new(vec![
            Cell::new(model.model()),
            Cell::new(&format!("{:?}", model.class())),
            Cell::new(&model.category().to_string()),
        ]));
    }
    table.printstd();
}
